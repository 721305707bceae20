//! HTTP request handlers for the `/api` endpoints.
//!
//! Each submodule covers one resource. Handlers are async functions that
//! receive axum extractors and return `Result<impl IntoResponse, AppError>`;
//! they validate the request, make one access-layer call, map an absent
//! document to 404 and serialise the result.

pub mod friends;
pub mod reactions;
pub mod thoughts;
pub mod users;

use std::sync::Arc;

use crate::access::{Reactions, Thoughts, Users};
use crate::error::AppError;
use crate::storage::Storage;

/// Shared application state threaded through all handlers via
/// [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn users(&self) -> Users {
        Users::new(Arc::clone(&self.storage))
    }

    pub fn thoughts(&self) -> Thoughts {
        Thoughts::new(Arc::clone(&self.storage))
    }

    pub fn reactions(&self) -> Reactions {
        Reactions::new(Arc::clone(&self.storage))
    }
}

/// Fallback for paths no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}

/// Fallback for a known path with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
