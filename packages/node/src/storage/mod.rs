//! Document store abstraction for the thoughtnet node.
//!
//! The [`Storage`] trait is the driver interface to the document store: one
//! collection per entity, with find-by-id, find-many, find-all, insert,
//! update-with-return, delete, and the set/list primitives the relationship
//! fields need. It knows nothing about expansion or HTTP; that lives in
//! [`crate::access`] and [`crate::handlers`].
//!
//! Every method is a single, independent store operation. Nothing here spans
//! two documents atomically, which is why the friend-edge operation built on
//! top of it is two writes.
//!
//! # Implementations
//!
//! | Type | When to use |
//! |------|-------------|
//! | [`MemoryStorage`] | Tests, conformance suite, throwaway nodes |
//! | [`SqliteStorage`] | Default; durable single-file database |
//!
//! [`MemoryStorage`]: memory::MemoryStorage
//! [`SqliteStorage`]: sqlite::SqliteStorage

pub mod memory;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod faulty;

use async_trait::async_trait;
use thoughtnet::{Reaction, Thought, User, UserPatch};

// ---------------------------------------------------------------------------
// StorageError
// ---------------------------------------------------------------------------

/// Errors that storage operations can return.
///
/// A missing document is not an error: lookups return `Option` and deletes
/// return whether anything was removed.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A document with the same `_id` already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An unexpected error in the underlying storage backend.
    #[error("internal storage error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// Storage trait
// ---------------------------------------------------------------------------

/// The persistence contract for a thoughtnet node.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared as
/// an `Arc<dyn Storage>` across request handlers.
///
/// Batch lookups (`get_users`, `get_thoughts`, `get_reactions`) return the
/// documents that exist, in the order of the requested ids; ids with no
/// document are skipped, so a dangling reference simply disappears from an
/// expanded list.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    // --- Users ---------------------------------------------------------------

    /// Insert a new user. Returns [`StorageError::Conflict`] if the id is taken.
    async fn insert_user(&self, user: &User) -> Result<(), StorageError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError>;

    async fn get_users(&self, ids: &[String]) -> Result<Vec<User>, StorageError>;

    /// All users, in creation order.
    async fn list_users(&self) -> Result<Vec<User>, StorageError>;

    /// Apply `patch` and return the updated user, or `None` if absent.
    async fn update_user(
        &self,
        id: &str,
        patch: &UserPatch,
    ) -> Result<Option<User>, StorageError>;

    /// Delete a user document. Returns `false` if it did not exist.
    ///
    /// References to the user held by other documents (friend sets, thought
    /// authors) are left in place.
    async fn delete_user(&self, id: &str) -> Result<bool, StorageError>;

    /// Add `friend_id` to `user_id`'s friend set (no-op if already present)
    /// and return the updated user, or `None` if `user_id` is absent.
    ///
    /// Touches only `user_id`'s document; the reverse edge is a separate call.
    async fn add_friend(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<User>, StorageError>;

    /// Remove `friend_id` from `user_id`'s friend set (no-op if absent) and
    /// return the updated user, or `None` if `user_id` is absent.
    async fn remove_friend(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<User>, StorageError>;

    /// Append `thought_id` to `user_id`'s thought list. Returns `None` if the
    /// user is absent.
    async fn push_thought(
        &self,
        user_id: &str,
        thought_id: &str,
    ) -> Result<Option<User>, StorageError>;

    // --- Thoughts ------------------------------------------------------------

    /// Insert a new thought, including its initial reaction list.
    async fn insert_thought(&self, thought: &Thought) -> Result<(), StorageError>;

    async fn get_thought(&self, id: &str) -> Result<Option<Thought>, StorageError>;

    async fn get_thoughts(&self, ids: &[String]) -> Result<Vec<Thought>, StorageError>;

    /// All thoughts, in creation order.
    async fn list_thoughts(&self) -> Result<Vec<Thought>, StorageError>;

    // --- Reactions -----------------------------------------------------------

    async fn insert_reaction(&self, reaction: &Reaction) -> Result<(), StorageError>;

    async fn get_reactions(&self, ids: &[String]) -> Result<Vec<Reaction>, StorageError>;

    /// Delete a reaction document. Thoughts that list it keep the id.
    async fn delete_reaction(&self, id: &str) -> Result<bool, StorageError>;
}
