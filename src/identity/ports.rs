//! Port for resolving user profiles.

use super::domain::{UserId, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory lookups.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Read-only view over the identity provider's user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a single user profile.
    ///
    /// Returns `None` when the user is unknown.
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserProfile>>;

    /// Resolves every known profile among `ids`.
    ///
    /// Unknown identifiers are skipped; the result order is unspecified.
    async fn find_many(&self, ids: &[UserId]) -> UserDirectoryResult<Vec<UserProfile>>;

    /// Returns whether a user exists.
    async fn exists(&self, id: UserId) -> UserDirectoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// Backing store failure.
    #[error("user directory error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a backing store error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
