//! Request and response types for the thoughtnet HTTP API.
//!
//! This crate encodes the wire contract of the `/api` endpoints as Rust
//! types, shared by the node and by anything that talks to it (the
//! conformance suite, clients).
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | GET | `/api/users` | → `Vec<`[`UserResponse`]`>` (thoughts, friends expanded) |
//! | GET | `/api/users/{id}` | → [`UserResponse`] (thoughts, friends expanded) |
//! | POST | `/api/users` | [`CreateUserRequest`] → [`UserResponse`] |
//! | PUT | `/api/users/{id}` | [`UpdateUserRequest`] → [`UserResponse`] |
//! | DELETE | `/api/users/{id}` | → [`MessageResponse`] |
//! | POST | `/api/users/{id}/friends/{friend_id}` | → [`UserResponse`] (friends expanded) |
//! | DELETE | `/api/users/{id}/friends/{friend_id}` | → [`UserResponse`] (friends expanded) |
//! | GET | `/api/thoughts` | → `Vec<`[`ThoughtResponse`]`>` (reactions expanded) |
//! | GET | `/api/thoughts/{id}` | → [`ThoughtResponse`] (reactions expanded) |
//! | POST | `/api/thoughts` | [`CreateThoughtRequest`] → [`ThoughtResponse`] |
//! | POST | `/api/reactions` | [`CreateReactionRequest`] → [`thoughtnet::Reaction`] |
//! | DELETE | `/api/reactions/{id}` | → [`MessageResponse`] |
//!
//! Every error response carries an [`ErrorResponse`] body.

pub mod error;
pub mod reaction;
pub mod related;
pub mod thought;
pub mod user;

pub use error::{codes, ErrorResponse};
pub use reaction::CreateReactionRequest;
pub use related::Related;
pub use thought::{CreateThoughtRequest, ThoughtResponse};
pub use user::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse};
