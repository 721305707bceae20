//! In-memory storage implementation.
//!
//! All data is held in RAM behind a [`RwLock`] and is lost when the process
//! exits. Use this for tests, the conformance suite, and throwaway nodes.
//!
//! Each collection is a [`BTreeMap`] keyed by UUIDv7 id. Because UUIDv7 ids
//! sort lexicographically in creation order, iterating a map yields documents
//! oldest first with no secondary index.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use thoughtnet::{Reaction, Thought, User, UserPatch};

use super::{Storage, StorageError};

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Inner {
    users: BTreeMap<String, User>,
    thoughts: BTreeMap<String, Thought>,
    reactions: BTreeMap<String, Reaction>,
}

/// Look up each id in `map`, skipping the ones that are absent.
fn collect_by_ids<T: Clone>(map: &BTreeMap<String, T>, ids: &[String]) -> Vec<T> {
    ids.iter().filter_map(|id| map.get(id).cloned()).collect()
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// Thread-safe, in-memory implementation of [`Storage`].
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StorageError> {
        self.inner
            .read()
            .map_err(|_| StorageError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StorageError> {
        self.inner
            .write()
            .map_err(|_| StorageError::Internal("memory store lock poisoned".into()))
    }

    /// Run `f` against a mutable user document, returning the updated copy.
    fn modify_user(
        &self,
        id: &str,
        f: impl FnOnce(&mut User),
    ) -> Result<Option<User>, StorageError> {
        let mut inner = self.write()?;
        let updated = inner.users.get_mut(id).map(|user| {
            f(user);
            user.clone()
        });
        Ok(updated)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Storage impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Storage for MemoryStorage {
    // --- Users ---------------------------------------------------------------

    async fn insert_user(&self, user: &User) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if inner.users.contains_key(&user.id) {
            return Err(StorageError::Conflict(format!(
                "user {} already exists",
                user.id
            )));
        }
        inner.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        Ok(self.read()?.users.get(id).cloned())
    }

    async fn get_users(&self, ids: &[String]) -> Result<Vec<User>, StorageError> {
        Ok(collect_by_ids(&self.read()?.users, ids))
    }

    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn update_user(
        &self,
        id: &str,
        patch: &UserPatch,
    ) -> Result<Option<User>, StorageError> {
        self.modify_user(id, |user| user.apply(patch))
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.write()?.users.remove(id).is_some())
    }

    async fn add_friend(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<User>, StorageError> {
        self.modify_user(user_id, |user| {
            if !user.friends.iter().any(|f| f == friend_id) {
                user.friends.push(friend_id.to_string());
            }
        })
    }

    async fn remove_friend(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<User>, StorageError> {
        self.modify_user(user_id, |user| user.friends.retain(|f| f != friend_id))
    }

    async fn push_thought(
        &self,
        user_id: &str,
        thought_id: &str,
    ) -> Result<Option<User>, StorageError> {
        self.modify_user(user_id, |user| user.thoughts.push(thought_id.to_string()))
    }

    // --- Thoughts ------------------------------------------------------------

    async fn insert_thought(&self, thought: &Thought) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if inner.thoughts.contains_key(&thought.id) {
            return Err(StorageError::Conflict(format!(
                "thought {} already exists",
                thought.id
            )));
        }
        inner.thoughts.insert(thought.id.clone(), thought.clone());
        Ok(())
    }

    async fn get_thought(&self, id: &str) -> Result<Option<Thought>, StorageError> {
        Ok(self.read()?.thoughts.get(id).cloned())
    }

    async fn get_thoughts(&self, ids: &[String]) -> Result<Vec<Thought>, StorageError> {
        Ok(collect_by_ids(&self.read()?.thoughts, ids))
    }

    async fn list_thoughts(&self) -> Result<Vec<Thought>, StorageError> {
        Ok(self.read()?.thoughts.values().cloned().collect())
    }

    // --- Reactions -----------------------------------------------------------

    async fn insert_reaction(&self, reaction: &Reaction) -> Result<(), StorageError> {
        let mut inner = self.write()?;
        if inner.reactions.contains_key(&reaction.id) {
            return Err(StorageError::Conflict(format!(
                "reaction {} already exists",
                reaction.id
            )));
        }
        inner.reactions.insert(reaction.id.clone(), reaction.clone());
        Ok(())
    }

    async fn get_reactions(&self, ids: &[String]) -> Result<Vec<Reaction>, StorageError> {
        Ok(collect_by_ids(&self.read()?.reactions, ids))
    }

    async fn delete_reaction(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.write()?.reactions.remove(id).is_some())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
