use std::sync::Arc;

use thoughtnet::{Relation, User, UserPatch};
use thoughtnet_api::{Related, UserResponse};

use super::wants;
use crate::storage::{Storage, StorageError};

/// Accessor for the user collection.
#[derive(Clone)]
pub struct Users {
    storage: Arc<dyn Storage>,
}

impl Users {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// All users, oldest first, with the `with` relations expanded.
    pub async fn list_all(&self, with: &[Relation]) -> Result<Vec<UserResponse>, StorageError> {
        let users = self.storage.list_users().await?;
        let mut out = Vec::with_capacity(users.len());
        for user in users {
            out.push(self.expand(user, with).await?);
        }
        Ok(out)
    }

    pub async fn get_by_id(
        &self,
        id: &str,
        with: &[Relation],
    ) -> Result<Option<UserResponse>, StorageError> {
        match self.storage.get_user(id).await? {
            Some(user) => Ok(Some(self.expand(user, with).await?)),
            None => Ok(None),
        }
    }

    /// Insert an already-validated user.
    pub async fn create(&self, user: User) -> Result<UserResponse, StorageError> {
        self.storage.insert_user(&user).await?;
        tracing::debug!(user_id = %user.id, "user created");
        Ok(UserResponse::unexpanded(user))
    }

    pub async fn update_by_id(
        &self,
        id: &str,
        patch: &UserPatch,
    ) -> Result<Option<UserResponse>, StorageError> {
        let updated = if patch.is_empty() {
            self.storage.get_user(id).await?
        } else {
            self.storage.update_user(id, patch).await?
        };
        Ok(updated.map(UserResponse::unexpanded))
    }

    /// Delete the user document. Friend sets and thought authors that point
    /// at it are left as they are.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, StorageError> {
        let deleted = self.storage.delete_user(id).await?;
        if deleted {
            tracing::debug!(user_id = %id, "user deleted");
        }
        Ok(deleted)
    }

    /// Create the friend edge `user_id`–`friend_id` in both friend sets and
    /// return `user_id` with friends expanded. `None` if either user is absent.
    ///
    /// The two set writes are separate store calls. If the second one fails
    /// the edge is left one-sided and the error is returned as is.
    pub async fn add_friend(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<UserResponse>, StorageError> {
        if self.storage.get_user(friend_id).await?.is_none() {
            return Ok(None);
        }
        let Some(user) = self.storage.add_friend(user_id, friend_id).await? else {
            return Ok(None);
        };
        if let Err(e) = self.storage.add_friend(friend_id, user_id).await {
            tracing::warn!(
                user_id,
                friend_id,
                error = %e,
                "reverse friend edge not written; edge is one-sided"
            );
            return Err(e);
        }
        Ok(Some(self.expand(user, &[Relation::Friends]).await?))
    }

    /// Remove the friend edge from both friend sets. Same shape and failure
    /// behaviour as [`Users::add_friend`].
    pub async fn remove_friend(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<UserResponse>, StorageError> {
        if self.storage.get_user(friend_id).await?.is_none() {
            return Ok(None);
        }
        let Some(user) = self.storage.remove_friend(user_id, friend_id).await? else {
            return Ok(None);
        };
        if let Err(e) = self.storage.remove_friend(friend_id, user_id).await {
            tracing::warn!(
                user_id,
                friend_id,
                error = %e,
                "reverse friend edge not removed; edge is one-sided"
            );
            return Err(e);
        }
        Ok(Some(self.expand(user, &[Relation::Friends]).await?))
    }

    async fn expand(&self, user: User, with: &[Relation]) -> Result<UserResponse, StorageError> {
        let thoughts = if wants(with, Relation::Thoughts) {
            self.storage
                .get_thoughts(&user.thoughts)
                .await?
                .into_iter()
                .map(Related::Document)
                .collect()
        } else {
            Related::ids(&user.thoughts)
        };
        let friends = if wants(with, Relation::Friends) {
            self.storage
                .get_users(&user.friends)
                .await?
                .into_iter()
                .map(Related::Document)
                .collect()
        } else {
            Related::ids(&user.friends)
        };
        Ok(UserResponse::with_related(user, thoughts, friends))
    }
}
