//! Shared helpers for the thoughtnet conformance test suite.
//!
//! Provides [`spawn_node`] and [`spawn_node_with`], which bind a
//! `TcpListener` on an ephemeral port, serve an in-process node on it and
//! return the base URL. Tests get direct access to the storage so they can
//! inspect documents without going through the HTTP layer.

use std::sync::Arc;

use thoughtnet_node::{build_router, MemoryStorage, SqliteStorage, Storage};

/// Which storage driver a test node runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Memory,
    Sqlite,
}

impl Driver {
    /// A fresh, empty store for this driver. SQLite runs in memory.
    pub fn open(self) -> Arc<dyn Storage> {
        match self {
            Driver::Memory => Arc::new(MemoryStorage::new()),
            Driver::Sqlite => {
                Arc::new(SqliteStorage::open_in_memory().expect("open in-memory sqlite"))
            }
        }
    }
}

/// Start an ephemeral in-process node on `storage` and return its base URL,
/// e.g. `http://127.0.0.1:51234`.
///
/// The node runs in a background `tokio` task bound to an OS-assigned port
/// on `127.0.0.1`.
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound.
pub async fn spawn_node_with(storage: Arc<dyn Storage>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");

    let router = build_router(storage);
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance node error");
    });

    format!("http://{addr}")
}

/// Start an ephemeral node backed by a fresh store of `driver`, returning
/// `(base_url, storage)`.
pub async fn spawn_node(driver: Driver) -> (String, Arc<dyn Storage>) {
    let storage = driver.open();
    let base_url = spawn_node_with(Arc::clone(&storage)).await;
    (base_url, storage)
}
