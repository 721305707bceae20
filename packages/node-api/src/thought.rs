//! Thought types: `GET/POST /api/thoughts`.

use serde::{Deserialize, Serialize};
use thoughtnet::{required, validate_thought, Reaction, Thought, ValidationError};

use crate::related::Related;

/// Request body for `POST /api/thoughts`.
///
/// `user` names the author; it is stored as given and not checked.
/// `reactions` optionally seeds the thought's reaction list with existing
/// reaction ids. This is the only way a reaction ever becomes attached to a
/// thought: `POST /api/reactions` creates free-standing reactions.
///
/// ```json
/// { "thoughtText": "hi", "user": "0192f1c4-..." }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateThoughtRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<String>,
}

impl CreateThoughtRequest {
    pub fn into_thought(self) -> Result<Thought, ValidationError> {
        let mut thought = Thought::new(required("thoughtText", self.thought_text)?, self.user);
        thought.reactions = self.reactions;
        validate_thought(&thought)?;
        Ok(thought)
    }
}

/// A thought as served over HTTP. `reactionCount` counts stored reaction ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub thought_text: String,
    pub user: Option<String>,
    pub reactions: Vec<Related<Reaction>>,
    pub reaction_count: usize,
    pub created_at: String,
}

impl ThoughtResponse {
    pub fn unexpanded(thought: Thought) -> Self {
        let reactions = Related::ids(&thought.reactions);
        Self::with_related(thought, reactions)
    }

    pub fn with_related(thought: Thought, reactions: Vec<Related<Reaction>>) -> Self {
        Self {
            reaction_count: thought.reactions.len(),
            id: thought.id,
            thought_text: thought.thought_text,
            user: thought.user,
            reactions,
            created_at: thought.created_at,
        }
    }
}
