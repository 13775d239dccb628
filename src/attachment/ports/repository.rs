//! Repository port for attachment metadata.

use crate::attachment::domain::{Attachment, AttachmentId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for attachment repository operations.
pub type AttachmentRepositoryResult<T> = Result<T, AttachmentRepositoryError>;

/// Attachment metadata persistence contract.
///
/// Lookups and listings only see live records. `max_version` is the
/// exception: it considers soft-deleted records so versions are not reused.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Stores a new attachment record.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentRepositoryError::DuplicateAttachment`] when the ID
    /// already exists and [`AttachmentRepositoryError::DuplicateVersion`]
    /// when the task already has a record, live or deleted, with the same
    /// file name and version.
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()>;

    /// Persists changes to an existing record, including soft-deletion.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentRepositoryError::NotFound`] when the record does
    /// not exist.
    async fn update(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()>;

    /// Finds a live record by identifier.
    async fn find_by_id(&self, id: AttachmentId) -> AttachmentRepositoryResult<Option<Attachment>>;

    /// Lists live records for a task, newest first.
    async fn list_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>>;

    /// Returns the highest version ever recorded for a file name on a task.
    async fn max_version(
        &self,
        task_id: TaskId,
        original_filename: &str,
    ) -> AttachmentRepositoryResult<Option<u32>>;
}

/// Errors returned by attachment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate attachment identifier: {0}")]
    DuplicateAttachment(AttachmentId),

    /// The version of this file name on this task is already taken.
    #[error("version {version} of {original_filename} already exists on task {task_id}")]
    DuplicateVersion {
        /// Owning task.
        task_id: TaskId,
        /// Client-supplied filename.
        original_filename: String,
        /// Version that was claimed.
        version: u32,
    },

    /// The record was not found.
    #[error("attachment not found: {0}")]
    NotFound(AttachmentId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttachmentRepositoryError {
    /// Builds the version conflict error for `attachment`.
    #[must_use]
    pub fn duplicate_version(attachment: &Attachment) -> Self {
        Self::DuplicateVersion {
            task_id: attachment.task_id(),
            original_filename: attachment.original_filename().to_owned(),
            version: attachment.version(),
        }
    }

    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
