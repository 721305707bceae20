use std::sync::Arc;

use thoughtnet::Reaction;

use crate::storage::{Storage, StorageError};

/// Accessor for the reaction collection.
///
/// Reactions are free-standing: creating one does not attach it to any
/// thought, and deleting one leaves the ids that thoughts hold in place.
#[derive(Clone)]
pub struct Reactions {
    storage: Arc<dyn Storage>,
}

impl Reactions {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, reaction: Reaction) -> Result<Reaction, StorageError> {
        self.storage.insert_reaction(&reaction).await?;
        Ok(reaction)
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<bool, StorageError> {
        self.storage.delete_reaction(id).await
    }
}
