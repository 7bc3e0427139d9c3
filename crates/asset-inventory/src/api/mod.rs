//! REST API for the asset inventory
//!
//! # Endpoints
//!
//! ## Session & Dashboard
//! - `POST /api/v1/login` - Placeholder credential check
//! - `GET /api/v1/stats` - Dashboard statistics
//! - `GET /api/v1/activity` - Recent changes
//!
//! ## Departments
//! - `GET /api/v1/departments` - List departments
//! - `GET /api/v1/departments/:name` - Get department details
//! - `GET /api/v1/departments/:name/free` - List free addresses
//!
//! ## Validation
//! - `POST /api/v1/validate/ip` - Check an IP for a department (dry run)
//! - `POST /api/v1/validate/mac` - Check a MAC address format
//!
//! ## Equipment
//! - `GET /api/v1/equipment` - List equipment
//! - `POST /api/v1/equipment` - Register equipment
//! - `GET /api/v1/equipment/:id` - Get equipment details
//! - `DELETE /api/v1/equipment/:id` - Delete equipment and release its IP
//!
//! ## Reports
//! - `GET /api/v1/reports/:kind` - `departments`, `equipment` or `ip-usage`
//!
//! ## Health
//! - `GET /health` - Health check
//! - `GET /ready` - Readiness check

pub mod dto;
pub mod handlers;
pub mod router;
pub mod state;

pub use dto::*;
pub use router::{create_router, ApiServerConfig};
pub use state::AppState;

use std::sync::Arc;

/// Start the API server
///
/// # Example
///
/// ```ignore
/// use asset_inventory::api::{start_server, AppState, ApiServerConfig};
/// use asset_inventory::InventoryConfig;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let state = Arc::new(AppState::seeded(InventoryConfig::from_env()).unwrap());
///     let config = ApiServerConfig::from_env();
///     start_server(state, config).await.unwrap();
/// }
/// ```
pub async fn start_server(
    state: Arc<AppState>,
    config: ApiServerConfig,
) -> Result<(), std::io::Error> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr()).await?;

    tracing::info!("Starting API server on {}", config.bind_addr());

    axum::serve(listener, app).await?;

    Ok(())
}
