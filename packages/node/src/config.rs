//! Node configuration, populated from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Default store when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://social_network_db.sqlite3";

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("HOST must be an IP address, got {0:?}")]
    InvalidHost(String),

    #[error("unsupported DATABASE_URL {0:?} (expected sqlite://<path> or memory://)")]
    UnsupportedDatabaseUrl(String),
}

/// Where the node keeps its documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// In-memory store; data is lost on exit.
    Memory,
    /// SQLite database file.
    Sqlite(PathBuf),
}

impl StoreLocation {
    /// Parse a `DATABASE_URL` connection string.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        if url == "memory://" {
            return Ok(StoreLocation::Memory);
        }
        match url.strip_prefix("sqlite://") {
            Some(path) if !path.is_empty() => Ok(StoreLocation::Sqlite(PathBuf::from(path))),
            _ => Err(ConfigError::UnsupportedDatabaseUrl(url.to_string())),
        }
    }
}

/// Runtime configuration for a thoughtnet node.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `PORT` | `3000` | TCP port to listen on |
/// | `HOST` | `0.0.0.0` | Interface to bind |
/// | `DATABASE_URL` | `sqlite://social_network_db.sqlite3` | `sqlite://<path>` or `memory://` |
///
/// Logging is configured separately through `RUST_LOG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,

    pub store: StoreLocation,
}

impl NodeConfig {
    /// Populate config from the process environment, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Populate config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 3000,
        };

        let host: IpAddr = match lookup("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(raw))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let store = StoreLocation::parse(&url)?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            store,
        })
    }
}
