use std::sync::Arc;

use thoughtnet::{Relation, Thought};
use thoughtnet_api::{Related, ThoughtResponse};

use super::wants;
use crate::storage::{Storage, StorageError};

/// Accessor for the thought collection.
#[derive(Clone)]
pub struct Thoughts {
    storage: Arc<dyn Storage>,
}

impl Thoughts {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn list_all(&self, with: &[Relation]) -> Result<Vec<ThoughtResponse>, StorageError> {
        let thoughts = self.storage.list_thoughts().await?;
        let mut out = Vec::with_capacity(thoughts.len());
        for thought in thoughts {
            out.push(self.expand(thought, with).await?);
        }
        Ok(out)
    }

    pub async fn get_by_id(
        &self,
        id: &str,
        with: &[Relation],
    ) -> Result<Option<ThoughtResponse>, StorageError> {
        match self.storage.get_thought(id).await? {
            Some(thought) => Ok(Some(self.expand(thought, with).await?)),
            None => Ok(None),
        }
    }

    /// Insert an already-validated thought, then append its id to the
    /// author's `thoughts` list.
    ///
    /// The author is a soft reference: when it names no user the thought is
    /// still created and no back-link is written.
    pub async fn create(&self, thought: Thought) -> Result<ThoughtResponse, StorageError> {
        self.storage.insert_thought(&thought).await?;

        if let Some(author) = &thought.user {
            let linked = self.storage.push_thought(author, &thought.id).await?;
            if linked.is_none() {
                tracing::info!(
                    thought_id = %thought.id,
                    author = %author,
                    "thought author does not exist; no back-link written"
                );
            }
        }

        Ok(ThoughtResponse::unexpanded(thought))
    }

    async fn expand(
        &self,
        thought: Thought,
        with: &[Relation],
    ) -> Result<ThoughtResponse, StorageError> {
        let reactions = if wants(with, Relation::Reactions) {
            self.storage
                .get_reactions(&thought.reactions)
                .await?
                .into_iter()
                .map(Related::Document)
                .collect()
        } else {
            Related::ids(&thought.reactions)
        };
        Ok(ThoughtResponse::with_related(thought, reactions))
    }
}

#[cfg(test)]
mod tests {
    use thoughtnet::{Reaction, User};

    use super::*;
    use crate::access::THOUGHT_RELATIONS;
    use crate::storage::memory::MemoryStorage;

    fn setup() -> (Arc<dyn Storage>, Thoughts) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        (Arc::clone(&storage), Thoughts::new(storage))
    }

    #[tokio::test]
    async fn create_links_thought_to_existing_author() {
        let (storage, thoughts) = setup();
        let u = User::new("ann", "a@x.com");
        storage.insert_user(&u).await.unwrap();

        let t = thoughts
            .create(Thought::new("hi", Some(u.id.clone())))
            .await
            .unwrap();
        let author = storage.get_user(&u.id).await.unwrap().unwrap();
        assert_eq!(author.thoughts, vec![t.id]);
    }

    #[tokio::test]
    async fn create_with_unknown_author_still_succeeds() {
        let (_, thoughts) = setup();
        let t = thoughts
            .create(Thought::new("hi", Some("ghost".into())))
            .await
            .unwrap();
        let got = thoughts.get_by_id(&t.id, &[]).await.unwrap().unwrap();
        assert_eq!(got.user.as_deref(), Some("ghost"));
    }

    #[tokio::test]
    async fn reactions_expand_in_stored_order_skipping_deleted() {
        let (storage, thoughts) = setup();
        let r1 = Reaction::new("one", None);
        let r2 = Reaction::new("two", None);
        storage.insert_reaction(&r1).await.unwrap();
        storage.insert_reaction(&r2).await.unwrap();

        let mut t = Thought::new("hi", None);
        t.reactions = vec![r2.id.clone(), r1.id.clone()];
        let t = thoughts.create(t).await.unwrap();
        storage.delete_reaction(&r2.id).await.unwrap();

        let got = thoughts.get_by_id(&t.id, THOUGHT_RELATIONS).await.unwrap().unwrap();
        assert_eq!(got.reactions, vec![Related::Document(r1)]);
        assert_eq!(got.reaction_count, 2);
    }

    #[tokio::test]
    async fn list_all_is_creation_ordered() {
        let (_, thoughts) = setup();
        thoughts.create(Thought::new("first", None)).await.unwrap();
        thoughts.create(Thought::new("second", None)).await.unwrap();
        let texts: Vec<String> = thoughts
            .list_all(THOUGHT_RELATIONS)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.thought_text)
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn missing_thought_is_none() {
        let (_, thoughts) = setup();
        assert!(thoughts.get_by_id("nope", THOUGHT_RELATIONS).await.unwrap().is_none());
    }
}
