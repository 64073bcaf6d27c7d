use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use courier_core::init_tracing;
use storage::{MessageRepository, MessageStore};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::ServerConfig;
use crate::http::{build_router, AppState};

/// Main entry: validate config, init logging, open the store, then serve until a shutdown signal.
///
/// Failing to open the store is fatal; no traffic is accepted without it.
#[instrument(skip(config))]
pub async fn run_server(config: ServerConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        max_connections = config.max_connections,
        store_timeout_ms = config.store_timeout_ms,
        "Initializing server"
    );

    let repo = MessageRepository::with_settings(&config.database_url, config.pool_settings())
        .await
        .with_context(|| format!("Failed to open message store at {}", config.database_url))?;

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    let store: Arc<dyn MessageStore> = Arc::new(repo.clone());
    let state = AppState::new(store, config.store_timeout());
    let served = serve(listener, state, shutdown_signal()).await;

    repo.close().await;
    served
}

/// Serves the API on an already-bound listener until `shutdown` resolves, then drains
/// in-flight requests.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "courier-server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server failed")?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutdown signal received, draining requests");
}
