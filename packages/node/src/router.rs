//! Assembles the axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{self, friends, reactions, thoughts, users, AppState},
    storage::Storage,
};

/// Build the complete application router around `storage`.
pub fn build_router(storage: Arc<dyn Storage>) -> Router {
    let state = AppState::new(storage);

    Router::new()
        // Users
        .route("/api/users", get(users::list).post(users::create))
        .route(
            "/api/users/{id}",
            get(users::get_by_id)
                .put(users::update)
                .delete(users::delete),
        )
        // Friend edges
        .route(
            "/api/users/{id}/friends/{friend_id}",
            post(friends::add).delete(friends::remove),
        )
        // Thoughts
        .route("/api/thoughts", get(thoughts::list).post(thoughts::create))
        .route("/api/thoughts/{id}", get(thoughts::get_by_id))
        // Reactions
        .route("/api/reactions", post(reactions::create))
        .route(
            "/api/reactions/{id}",
            axum::routing::delete(reactions::delete),
        )
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
