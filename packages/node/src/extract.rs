//! Request extractors.
//!
//! Both wrap the axum extractor of the same shape and turn its rejection
//! into an [`AppError`], so a bad request still gets an `ErrorResponse`
//! body instead of axum's plain text.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};

use crate::error::AppError;

/// JSON body extractor. Unparsable bodies are `400 invalid_json`; an
/// oversized body keeps its 413 and a missing JSON content type its 415.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                let message = rejection.body_text();
                Err(match rejection.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(message),
                    StatusCode::UNSUPPORTED_MEDIA_TYPE => AppError::UnsupportedMediaType(message),
                    _ => AppError::BadRequest(message),
                })
            }
        }
    }
}

/// Path parameter extractor.
///
/// Ids are opaque, so a segment that cannot be decoded names no document
/// and is reported as `404 not_found`.
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParam(value)),
            Err(rejection) => Err(AppError::NotFound(rejection.body_text())),
        }
    }
}
