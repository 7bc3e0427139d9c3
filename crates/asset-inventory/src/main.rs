use anyhow::{Context, Result};
use asset_inventory::{start_server, ApiServerConfig, AppState, InventoryConfig};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "asset-inventory")]
#[command(about = "IT asset inventory server")]
#[command(version)]
struct Cli {
    /// Server bind address
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(long, env = "API_PORT", default_value = "8080")]
    port: u16,

    /// JSON file with departments and equipment to load at startup
    #[arg(long, env = "INVENTORY_SEED_FILE")]
    seed_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "asset_inventory={},tower_http={}",
                    log_level, log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = InventoryConfig::from_env();
    if let Some(path) = cli.seed_file {
        config = config.with_seed_file(path);
    }

    let state = AppState::seeded(config).context("failed to load inventory")?;

    let audit = state.inventory.departments().audit();
    if !audit.is_empty() {
        anyhow::bail!("inventory failed its allocation audit with {} fault(s)", audit.len());
    }

    let server = ApiServerConfig {
        host: cli.host,
        port: cli.port,
    };

    tracing::info!("Starting asset inventory");
    tracing::info!("Server will bind to: {}", server.bind_addr());
    tracing::info!("Health endpoint: http://{}/health", server.bind_addr());

    start_server(Arc::new(state), server).await?;

    Ok(())
}
