//! Core entity types for thoughtnet.
//!
//! thoughtnet is a small social backend: users post short *thoughts*, other
//! users leave *reactions* on them, and users befriend each other through a
//! symmetric friend relation. This crate holds the documents themselves and the
//! presence checks applied before a document is written. Storage, expansion,
//! and HTTP live in `thoughtnet-node`; the wire-level request and response
//! types live in `thoughtnet-api`.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Documents: [`User`], [`Thought`], [`Reaction`], plus [`UserPatch`] and [`Relation`] |
//! | [`validation`] | Required-field checks via [`validate_user`], [`validate_thought`], [`validate_reaction`] |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use thoughtnet::{validate_user, User};
//!
//! let user = User::new("ann", "ann@x.com");
//! validate_user(&user).expect("username and email are present");
//!
//! // `_id`, camelCase field names, as stored and served.
//! let json = serde_json::to_string_pretty(&user).unwrap();
//! ```

pub mod types;
pub mod validation;

pub use types::{new_id, now_timestamp, Reaction, Relation, Thought, User, UserPatch};
pub use validation::{
    required, validate_reaction, validate_thought, validate_user, validate_user_patch,
    ValidationError,
};
