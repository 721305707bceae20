//! Friend-edge handlers.
//!
//! - `POST   /api/users/{id}/friends/{friend_id}` — add the edge.
//! - `DELETE /api/users/{id}/friends/{friend_id}` — remove the edge.
//!
//! Both return user `{id}` with friends expanded, or 404 `User not found`
//! when either user is absent. Each edit is two independent writes; a
//! failure on the second surfaces as 500 and leaves the edge one-sided.

use axum::{
    extract::State,
    Json,
};
use thoughtnet_api::UserResponse;

use crate::error::AppError;
use crate::extract::PathParam;

use super::AppState;

pub async fn add(
    State(state): State<AppState>,
    PathParam((id, friend_id)): PathParam<(String, String)>,
) -> Result<Json<UserResponse>, AppError> {
    state
        .users()
        .add_friend(&id, &friend_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("User"))
}

pub async fn remove(
    State(state): State<AppState>,
    PathParam((id, friend_id)): PathParam<(String, String)>,
) -> Result<Json<UserResponse>, AppError> {
    state
        .users()
        .remove_friend(&id, &friend_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("User"))
}
