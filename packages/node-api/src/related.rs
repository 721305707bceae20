//! Reference fields that may or may not be expanded.

use serde::{Deserialize, Serialize};

/// A relationship entry in a response: either the bare identifier, as
/// stored, or the referenced document inlined by expansion.
///
/// Serialises untagged, so an unexpanded list is `["id1", "id2"]` and an
/// expanded one is `[{ "_id": "id1", ... }, ...]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Related<T> {
    Id(String),
    Document(T),
}

impl<T> Related<T> {
    /// The inlined document, if this entry was expanded.
    pub fn document(&self) -> Option<&T> {
        match self {
            Related::Id(_) => None,
            Related::Document(doc) => Some(doc),
        }
    }

    /// Wrap stored identifiers without expanding them.
    pub fn ids(ids: &[String]) -> Vec<Self> {
        ids.iter().cloned().map(Related::Id).collect()
    }
}
