//! Reaction types: `POST /api/reactions`.

use serde::{Deserialize, Serialize};
use thoughtnet::{required, validate_reaction, Reaction, ValidationError};

/// Request body for `POST /api/reactions`.
///
/// ```json
/// { "reactionBody": "nice", "user": "0192f1c4-..." }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateReactionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl CreateReactionRequest {
    pub fn into_reaction(self) -> Result<Reaction, ValidationError> {
        let reaction = Reaction::new(required("reactionBody", self.reaction_body)?, self.user);
        validate_reaction(&reaction)?;
        Ok(reaction)
    }
}
