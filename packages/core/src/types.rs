//! Documents stored by thoughtnet.
//!
//! Each entity maps to one collection. Relationship fields hold identifiers
//! only; replacing them with the referenced documents (expansion) is done by
//! the access layer in `thoughtnet-node`, never here.
//!
//! All documents serialise with `_id` and camelCase field names, which is
//! the shape clients see on the wire.

use serde::{Deserialize, Serialize};

/// Generate a fresh document identifier.
///
/// Identifiers are UUIDv7 strings, so they sort lexicographically in
/// creation order. Callers must still treat them as opaque.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// The current time as an RFC 3339 string, used for `createdAt`.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// A registered user.
///
/// `thoughts` is an ordered back-list of the thoughts this user authored.
/// `friends` has set semantics (no duplicates) and is kept symmetric with the
/// friend's own `friends` field by the friend-edge operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier. Immutable once assigned.
    #[serde(rename = "_id")]
    pub id: String,

    pub username: String,

    pub email: String,

    /// Ids of thoughts authored by this user, oldest first.
    #[serde(default)]
    pub thoughts: Vec<String>,

    /// Ids of this user's friends, in the order the edges were added.
    #[serde(default)]
    pub friends: Vec<String>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl User {
    /// Create a user with a fresh id, no thoughts, and no friends.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            username: username.into(),
            email: email.into(),
            thoughts: Vec::new(),
            friends: Vec::new(),
            created_at: now_timestamp(),
        }
    }

    /// Apply a partial update in place. Absent fields are left unchanged.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(username) = &patch.username {
            self.username = username.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
    }
}

/// A partial update to a [`User`]'s scalar fields.
///
/// Reference lists are never touched by an update; friends change only
/// through the friend-edge operations, thoughts only through thought creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserPatch {
    /// `true` when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// A short text post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    #[serde(rename = "_id")]
    pub id: String,

    pub thought_text: String,

    /// Id of the authoring user. This is a soft reference: nothing checks
    /// that the user exists, and deleting the user leaves it dangling.
    #[serde(default)]
    pub user: Option<String>,

    /// Ids of reactions attached to this thought. Reactions carry no
    /// back-reference, so this list is the only link between the two.
    #[serde(default)]
    pub reactions: Vec<String>,

    pub created_at: String,
}

impl Thought {
    pub fn new(thought_text: impl Into<String>, user: Option<String>) -> Self {
        Self {
            id: new_id(),
            thought_text: thought_text.into(),
            user,
            reactions: Vec::new(),
            created_at: now_timestamp(),
        }
    }
}

/// A reaction left by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    #[serde(rename = "_id")]
    pub id: String,

    pub reaction_body: String,

    /// Id of the reacting user (soft reference).
    #[serde(default)]
    pub user: Option<String>,

    pub created_at: String,
}

impl Reaction {
    pub fn new(reaction_body: impl Into<String>, user: Option<String>) -> Self {
        Self {
            id: new_id(),
            reaction_body: reaction_body.into(),
            user,
            created_at: now_timestamp(),
        }
    }
}

/// A relationship field that can be expanded on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `User.thoughts` → [`Thought`] documents.
    Thoughts,
    /// `User.friends` → [`User`] documents.
    Friends,
    /// `Thought.reactions` → [`Reaction`] documents.
    Reactions,
}
