//! Ecodash dashboard server - main entry point

use anyhow::Result;
use clap::Parser;
use ecodash_common::logging::{init_logging, LoggingConfig};
use ecodash_config::ConfigLoader;
use ecodash_data::{DataStore, WorldBankClient};
use ecodash_server::{routes::create_router, AppState};
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level override
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match args.config {
        Some(path) => ConfigLoader::load_from_file(&path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    // Initialize logging
    init_logging(LoggingConfig {
        level: config.logging.level.clone(),
        json_format: config.logging.json,
        file_path: config.logging.file.clone(),
        ..LoggingConfig::default()
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting Economic Trend Analysis Dashboard");

    // Fetch the indicator tables once; the store substitutes empty tables
    // for any failed fetch, so startup proceeds either way
    let client = WorldBankClient::new(config.worldbank.clone())?;
    let store = DataStore::load(&client).await;
    if store.countries().is_empty() {
        info!("No indicator data loaded; the dashboard will show placeholders");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(store, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard server has shut down");
    Ok(())
}

/// Resolve when ctrl-c is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Received shutdown signal, stopping server");
}
