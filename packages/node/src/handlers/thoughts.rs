//! Thought handlers.
//!
//! - `GET  /api/thoughts`       — list thoughts, reactions expanded.
//! - `GET  /api/thoughts/{id}`  — one thought, reactions expanded.
//! - `POST /api/thoughts`       — create a thought and link it to its author.

use axum::{
    extract::State,
    Json,
};
use thoughtnet_api::{CreateThoughtRequest, ThoughtResponse};

use crate::access::THOUGHT_RELATIONS;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};

use super::AppState;

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ThoughtResponse>>, AppError> {
    let thoughts = state.thoughts().list_all(THOUGHT_RELATIONS).await?;
    Ok(Json(thoughts))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Result<Json<ThoughtResponse>, AppError> {
    state
        .thoughts()
        .get_by_id(&id, THOUGHT_RELATIONS)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Thought"))
}

/// `POST /api/thoughts`. The author id is not checked; an optional
/// `reactions` id list seeds the thought's reactions.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateThoughtRequest>,
) -> Result<Json<ThoughtResponse>, AppError> {
    let thought = req.into_thought()?;
    let created = state.thoughts().create(thought).await?;
    Ok(Json(created))
}
