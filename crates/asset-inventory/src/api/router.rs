//! API router configuration
//!
//! Defines all API routes and middleware.

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Session & dashboard
        .route("/api/v1/login", post(handlers::login))
        .route("/api/v1/stats", get(handlers::get_stats))
        .route("/api/v1/activity", get(handlers::get_activity))
        // Departments
        .route("/api/v1/departments", get(handlers::list_departments))
        .route("/api/v1/departments/:name", get(handlers::get_department))
        .route(
            "/api/v1/departments/:name/free",
            get(handlers::get_free_addresses),
        )
        // Validation
        .route("/api/v1/validate/ip", post(handlers::validate_ip))
        .route("/api/v1/validate/mac", post(handlers::validate_mac))
        // Equipment
        .route(
            "/api/v1/equipment",
            get(handlers::list_equipment).post(handlers::create_equipment),
        )
        .route(
            "/api/v1/equipment/:id",
            get(handlers::get_equipment).delete(handlers::delete_equipment),
        )
        // Reports
        .route("/api/v1/reports/:kind", get(handlers::get_report))
        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check endpoint
async fn readiness_check() -> &'static str {
    "READY"
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ApiServerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_status(uri: &str) -> StatusCode {
        let app = create_router(Arc::new(AppState::new()));
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(get_status("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_check() {
        assert_eq!(get_status("/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_departments_empty() {
        assert_eq!(get_status("/api/v1/departments").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_equipment_empty() {
        assert_eq!(get_status("/api/v1/equipment").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_department() {
        assert_eq!(
            get_status("/api/v1/departments/Warehouse").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_unknown_report_kind() {
        assert_eq!(
            get_status("/api/v1/reports/pdf").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_seeded_state_serves_builtin_departments() {
        use crate::config::InventoryConfig;
        use http_body_util::BodyExt;

        let state = Arc::new(AppState::seeded(InventoryConfig::default()).unwrap());
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/departments")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let departments: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(departments.as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_bind_addr() {
        let config = ApiServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }
}
