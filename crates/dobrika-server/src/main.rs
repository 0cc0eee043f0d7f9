//! Dobrika server entry point.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use dobrika_server::{open_layer, serve, Args, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dobrika=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ServerConfig::from_args(&args)?;
    tracing::info!(
        addr = %config.bind_addr(),
        db_path = %config.search.db_path.display(),
        cold_backup_minutes = config.search.cold_backup_minutes,
        hot_backup_minutes = config.search.hot_backup_minutes,
        search_offset = config.search.search_offset,
        search_limit = config.search.search_limit,
        geo_slot = config.search.geo_slot,
        "Configuration loaded"
    );

    let layer = open_layer(&config).await?;
    serve(layer, &config, shutdown_signal()).await?;

    tracing::info!("Dobrika stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
