//! Public surface for the `thoughtnet-node` crate.
//!
//! Exposes the router builder, storage drivers and config types so that
//! external crates (e.g. the conformance test suite) can spin up an
//! in-process node without spawning a subprocess.

pub mod access;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod storage;

pub use config::{ConfigError, NodeConfig, StoreLocation};
pub use router::build_router;
pub use storage::{memory::MemoryStorage, sqlite::SqliteStorage, Storage, StorageError};
