//! User types: `POST/GET/PUT/DELETE /api/users` and the friend-edge
//! endpoints under `/api/users/{id}/friends/{friend_id}`.

use serde::{Deserialize, Serialize};
use thoughtnet::{
    required, validate_user, validate_user_patch, Thought, User, UserPatch, ValidationError,
};

use crate::related::Related;

/// Request body for `POST /api/users`.
///
/// Fields are optional at the serde level so that a missing field is
/// reported as a validation failure naming the field, not as a JSON error.
///
/// ```json
/// { "username": "ann", "email": "ann@x.com" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CreateUserRequest {
    /// Build a new [`User`] document with a fresh id and empty reference lists.
    pub fn into_user(self) -> Result<User, ValidationError> {
        let user = User::new(
            required("username", self.username)?,
            required("email", self.email)?,
        );
        validate_user(&user)?;
        Ok(user)
    }
}

/// Request body for `PUT /api/users/{id}`. Any subset of the fields may be
/// given; an empty object leaves the user unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_patch(self) -> Result<UserPatch, ValidationError> {
        let patch = UserPatch {
            username: self.username,
            email: self.email,
        };
        validate_user_patch(&patch)?;
        Ok(patch)
    }
}

/// A user as served over HTTP.
///
/// `thoughts` and `friends` hold ids or inlined documents depending on which
/// relations the endpoint expands. `friendCount` counts the stored friend
/// ids, dangling ones included.
///
/// # Example
///
/// ```json
/// {
///   "_id": "0192f1c4-...",
///   "username": "ann",
///   "email": "ann@x.com",
///   "thoughts": [],
///   "friends": [],
///   "friendCount": 0,
///   "createdAt": "2026-02-18T12:00:00+00:00"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub thoughts: Vec<Related<Thought>>,
    pub friends: Vec<Related<User>>,
    pub friend_count: usize,
    pub created_at: String,
}

impl UserResponse {
    /// Build a response whose reference lists are left as ids.
    pub fn unexpanded(user: User) -> Self {
        let thoughts = Related::ids(&user.thoughts);
        let friends = Related::ids(&user.friends);
        Self::with_related(user, thoughts, friends)
    }

    /// Build a response with the given (possibly expanded) reference lists.
    pub fn with_related(
        user: User,
        thoughts: Vec<Related<Thought>>,
        friends: Vec<Related<User>>,
    ) -> Self {
        Self {
            friend_count: user.friends.len(),
            id: user.id,
            username: user.username,
            email: user.email,
            thoughts,
            friends,
            created_at: user.created_at,
        }
    }
}

/// Confirmation body for deletes, e.g. `{ "message": "User deleted" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
