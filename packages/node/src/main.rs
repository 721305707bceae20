//! `tnet-node` — thoughtnet HTTP server.
//!
//! # Quick start
//!
//! ```sh
//! # SQLite file in the working directory, port 3000:
//! tnet-node
//!
//! # In-memory store on another port:
//! PORT=8080 DATABASE_URL=memory:// tnet-node
//! ```
//!
//! See [`thoughtnet_node::NodeConfig`] for the full list of variables.

use std::process::ExitCode;
use std::sync::Arc;

use thoughtnet_node::{
    build_router, MemoryStorage, NodeConfig, SqliteStorage, Storage, StoreLocation,
};
use tokio::signal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thoughtnet_node=info,tower_http=debug".into()),
        )
        .init();

    let config = match NodeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let storage: Arc<dyn Storage> = match &config.store {
        StoreLocation::Sqlite(path) => {
            match SqliteStorage::open(path) {
                Ok(store) => {
                    tracing::info!("storage: SQLite at {}", path.display());
                    Arc::new(store)
                }
                Err(e) => {
                    tracing::error!("failed to open SQLite database at {}: {e}", path.display());
                    return ExitCode::FAILURE;
                }
            }
        }
        StoreLocation::Memory => {
            tracing::info!("storage: in-memory (data will not survive restart)");
            Arc::new(MemoryStorage::new())
        }
    };

    let app = build_router(storage);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {e}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        "Server is running on http://localhost:{}",
        config.bind_addr.port()
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("server shut down");
    ExitCode::SUCCESS
}

/// Resolve on Ctrl-C (or SIGTERM on unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
