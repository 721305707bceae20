//! Reaction handlers.
//!
//! - `POST   /api/reactions`       — create a free-standing reaction.
//! - `DELETE /api/reactions/{id}`  — delete a reaction.
//!
//! There is no endpoint that attaches a reaction to an existing thought.

use axum::{
    extract::State,
    Json,
};
use thoughtnet::Reaction;
use thoughtnet_api::{CreateReactionRequest, MessageResponse};

use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};

use super::AppState;

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateReactionRequest>,
) -> Result<Json<Reaction>, AppError> {
    let reaction = req.into_reaction()?;
    let created = state.reactions().create(reaction).await?;
    Ok(Json(created))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.reactions().delete_by_id(&id).await? {
        return Err(AppError::not_found("Reaction"));
    }
    Ok(Json(MessageResponse::new("Reaction deleted")))
}
