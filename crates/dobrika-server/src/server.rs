//! Server lifecycle: open the search layer, serve HTTP, stop the backup jobs.

use std::future::Future;
use std::sync::Arc;

use dobrika_search::SearchLayer;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::routes::router;

/// Open the search layer described by `config` on the blocking pool.
pub async fn open_layer(config: &ServerConfig) -> Result<Arc<SearchLayer>> {
    let search = config.search.clone();
    let layer = tokio::task::spawn_blocking(move || SearchLayer::open(search))
        .await
        .map_err(|e| Error::Startup(e.to_string()))??;
    Ok(Arc::new(layer))
}

/// Serve `layer` until `shutdown` resolves.
///
/// The backup scheduler runs when a backup root is configured. It is stopped
/// and joined on every exit path, including a failed `serve`.
pub async fn serve<F>(layer: Arc<SearchLayer>, config: &ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
        tracing::error!("Cannot bind {bind_addr}: {e}");
        Error::Io(e)
    })?;
    tracing::info!("Dobrika listening on http://{bind_addr}");

    match &config.backup_root {
        Some(root) => layer.start_backup_scheduler(root.clone()).await,
        None => tracing::info!("No backup root configured, backups disabled"),
    }

    let served = axum::serve(listener, router(Arc::clone(&layer)))
        .with_graceful_shutdown(shutdown)
        .await;

    layer.stop_backup_scheduler().await;
    served.map_err(Error::Io)
}

// ============================================================================
// Tests
// ============================================================================
