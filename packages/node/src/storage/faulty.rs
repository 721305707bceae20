//! A [`Storage`] wrapper that injects failures, for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use thoughtnet::{Reaction, Thought, User, UserPatch};

use super::{memory::MemoryStorage, Storage, StorageError};

/// Delegates to a [`MemoryStorage`], failing with
/// [`StorageError::Internal`] according to its mode.
pub struct FaultyStorage {
    inner: MemoryStorage,
    mode: Mode,
    friend_writes: AtomicUsize,
}

enum Mode {
    /// Every call fails.
    Down,
    /// `add_friend`/`remove_friend` succeed this many times, then fail.
    FriendWritesAllowed(usize),
}

impl FaultyStorage {
    pub fn down() -> Self {
        Self::with_mode(Mode::Down)
    }

    pub fn friend_writes_allowed(n: usize) -> Self {
        Self::with_mode(Mode::FriendWritesAllowed(n))
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            inner: MemoryStorage::new(),
            mode,
            friend_writes: AtomicUsize::new(0),
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        match self.mode {
            Mode::Down => Err(injected()),
            Mode::FriendWritesAllowed(_) => Ok(()),
        }
    }

    fn check_friend_write(&self) -> Result<(), StorageError> {
        self.check()?;
        if let Mode::FriendWritesAllowed(n) = self.mode {
            if self.friend_writes.fetch_add(1, Ordering::SeqCst) >= n {
                return Err(injected());
            }
        }
        Ok(())
    }
}

fn injected() -> StorageError {
    StorageError::Internal("injected failure".into())
}

#[async_trait]
impl Storage for FaultyStorage {
    async fn insert_user(&self, user: &User) -> Result<(), StorageError> {
        self.check()?;
        self.inner.insert_user(user).await
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        self.check()?;
        self.inner.get_user(id).await
    }

    async fn get_users(&self, ids: &[String]) -> Result<Vec<User>, StorageError> {
        self.check()?;
        self.inner.get_users(ids).await
    }

    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        self.check()?;
        self.inner.list_users().await
    }

    async fn update_user(
        &self,
        id: &str,
        patch: &UserPatch,
    ) -> Result<Option<User>, StorageError> {
        self.check()?;
        self.inner.update_user(id, patch).await
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StorageError> {
        self.check()?;
        self.inner.delete_user(id).await
    }

    async fn add_friend(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<User>, StorageError> {
        self.check_friend_write()?;
        self.inner.add_friend(user_id, friend_id).await
    }

    async fn remove_friend(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<User>, StorageError> {
        self.check_friend_write()?;
        self.inner.remove_friend(user_id, friend_id).await
    }

    async fn push_thought(
        &self,
        user_id: &str,
        thought_id: &str,
    ) -> Result<Option<User>, StorageError> {
        self.check()?;
        self.inner.push_thought(user_id, thought_id).await
    }

    async fn insert_thought(&self, thought: &Thought) -> Result<(), StorageError> {
        self.check()?;
        self.inner.insert_thought(thought).await
    }

    async fn get_thought(&self, id: &str) -> Result<Option<Thought>, StorageError> {
        self.check()?;
        self.inner.get_thought(id).await
    }

    async fn get_thoughts(&self, ids: &[String]) -> Result<Vec<Thought>, StorageError> {
        self.check()?;
        self.inner.get_thoughts(ids).await
    }

    async fn list_thoughts(&self) -> Result<Vec<Thought>, StorageError> {
        self.check()?;
        self.inner.list_thoughts().await
    }

    async fn insert_reaction(&self, reaction: &Reaction) -> Result<(), StorageError> {
        self.check()?;
        self.inner.insert_reaction(reaction).await
    }

    async fn get_reactions(&self, ids: &[String]) -> Result<Vec<Reaction>, StorageError> {
        self.check()?;
        self.inner.get_reactions(ids).await
    }

    async fn delete_reaction(&self, id: &str) -> Result<bool, StorageError> {
        self.check()?;
        self.inner.delete_reaction(id).await
    }
}
