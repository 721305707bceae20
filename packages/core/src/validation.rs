//! Required-field checks applied before a document is written.
//!
//! Only presence is checked: a required text field must exist and be
//! non-empty. Formats (e-mail shape, lengths, uniqueness) are not validated.

use thiserror::Error;

use crate::types::{Reaction, Thought, User, UserPatch};

/// Errors returned when a document is missing a required field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Validate a [`User`] before insert.
pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    require_text("username", &user.username)?;
    require_text("email", &user.email)?;
    Ok(())
}

/// Validate a [`UserPatch`]. Absent fields are fine; present ones must not
/// be empty, since they would overwrite a required field.
pub fn validate_user_patch(patch: &UserPatch) -> Result<(), ValidationError> {
    if let Some(username) = &patch.username {
        require_text("username", username)?;
    }
    if let Some(email) = &patch.email {
        require_text("email", email)?;
    }
    Ok(())
}

/// Validate a [`Thought`] before insert. The author reference is not checked.
pub fn validate_thought(thought: &Thought) -> Result<(), ValidationError> {
    require_text("thoughtText", &thought.thought_text)
}

/// Validate a [`Reaction`] before insert.
pub fn validate_reaction(reaction: &Reaction) -> Result<(), ValidationError> {
    require_text("reactionBody", &reaction.reaction_body)
}

/// Unwrap an optional request field, failing with
/// [`ValidationError::MissingField`] when it is absent.
pub fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

// --- helpers -----------------------------------------------------------------

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

// --- tests -------------------------------------------------------------------
