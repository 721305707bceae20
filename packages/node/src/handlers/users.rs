//! User handlers.
//!
//! - `GET    /api/users`       — list users, thoughts and friends expanded.
//! - `GET    /api/users/{id}`  — one user, thoughts and friends expanded.
//! - `POST   /api/users`       — create a user.
//! - `PUT    /api/users/{id}`  — partial update of `username`/`email`.
//! - `DELETE /api/users/{id}`  — delete a user. References held by other
//!   documents are not cleaned up.

use axum::{
    extract::State,
    Json,
};
use thoughtnet_api::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse};

use crate::access::USER_RELATIONS;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};

use super::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users().list_all(USER_RELATIONS).await?;
    Ok(Json(users))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Result<Json<UserResponse>, AppError> {
    state
        .users()
        .get_by_id(&id, USER_RELATIONS)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("User"))
}

/// `POST /api/users`. Returns 422 when `username` or `email` is missing or
/// empty.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = req.into_user()?;
    let created = state.users().create(user).await?;
    Ok(Json(created))
}

/// `PUT /api/users/{id}`. Absent fields are left unchanged; present ones
/// must not be empty.
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let patch = req.into_patch()?;
    state
        .users()
        .update_by_id(&id, &patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("User"))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.users().delete_by_id(&id).await? {
        return Err(AppError::not_found("User"));
    }
    Ok(Json(MessageResponse::new("User deleted")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handlers::testing::{app_with, create_user, memory_app, send};
    use crate::storage::faulty::FaultyStorage;

    #[tokio::test]
    async fn create_then_get_returns_submitted_fields() {
        let app = memory_app();
        let id = create_user(&app, "ann").await;

        let (status, json) = send(&app, "GET", &format!("/api/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["_id"], id.as_str());
        assert_eq!(json["username"], "ann");
        assert_eq!(json["email"], "ann@x.com");
        assert_eq!(json["thoughts"], json!([]));
        assert_eq!(json["friends"], json!([]));
        assert_eq!(json["friendCount"], 0);
        assert!(json["createdAt"].is_string());
    }

    #[tokio::test]
    async fn list_returns_users_in_creation_order() {
        let app = memory_app();
        create_user(&app, "ann").await;
        create_user(&app, "bo").await;

        let (status, json) = send(&app, "GET", "/api/users", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["username"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["ann", "bo"]);
    }

    #[tokio::test]
    async fn missing_username_returns_422() {
        let app = memory_app();
        let (status, json) =
            send(&app, "POST", "/api/users", Some(json!({ "email": "a@x.com" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "validation_failed");
        assert_eq!(json["error"], "username is required");
    }

    #[tokio::test]
    async fn malformed_json_returns_400() {
        let app = memory_app();
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let resp = tower::ServiceExt::oneshot(app, req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = http_body_util::BodyExt::collect(resp.into_body())
            .await
            .unwrap()
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "invalid_json");
    }

    #[tokio::test]
    async fn undecodable_path_id_returns_json_404() {
        let app = memory_app();
        for (method, body) in [
            ("GET", None),
            ("PUT", Some(json!({ "username": "x" }))),
            ("DELETE", None),
        ] {
            let (status, json) = send(&app, method, "/api/users/%FF", body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
            assert_eq!(json["code"], "not_found");
            assert!(json["error"].is_string());
        }
    }

    #[tokio::test]
    async fn body_without_json_content_type_returns_415() {
        let app = memory_app();
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/api/users")
            .body(axum::body::Body::from(r#"{"username":"ann","email":"a@x.com"}"#))
            .unwrap();
        let resp = tower::ServiceExt::oneshot(app, req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let bytes = http_body_util::BodyExt::collect(resp.into_body())
            .await
            .unwrap()
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "unsupported_media_type");
    }

    #[tokio::test]
    async fn oversized_body_returns_413() {
        let app = memory_app();
        let huge = "a".repeat(3 * 1024 * 1024);
        let (status, json) = send(
            &app,
            "POST",
            "/api/users",
            Some(json!({ "username": huge, "email": "a@x.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["code"], "payload_too_large");
    }

    #[tokio::test]
    async fn unknown_id_returns_404_for_get_put_delete() {
        let app = memory_app();
        for (method, body) in [
            ("GET", None),
            ("PUT", Some(json!({ "username": "x" }))),
            ("DELETE", None),
        ] {
            let (status, json) = send(&app, method, "/api/users/nope", body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
            assert_eq!(json["error"], "User not found");
            assert_eq!(json["code"], "not_found");
        }
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let app = memory_app();
        let id = create_user(&app, "ann").await;

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/users/{id}"),
            Some(json!({ "email": "ann@y.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["username"], "ann");
        assert_eq!(json["email"], "ann@y.com");

        let (status, json) =
            send(&app, "PUT", &format!("/api/users/{id}"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["email"], "ann@y.com");
    }

    #[tokio::test]
    async fn update_with_empty_field_returns_422() {
        let app = memory_app();
        let id = create_user(&app, "ann").await;
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/users/{id}"),
            Some(json!({ "username": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn delete_then_get_returns_404() {
        let app = memory_app();
        let id = create_user(&app, "ann").await;

        let (status, json) = send(&app, "DELETE", &format!("/api/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "User deleted");

        let (status, _) = send(&app, "GET", &format!("/api/users/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_failure_returns_generic_500() {
        let app = app_with(Arc::new(FaultyStorage::down()));
        let (status, json) = send(&app, "GET", "/api/users", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Internal Server Error");
        assert_eq!(json["code"], "internal_error");
    }
}
