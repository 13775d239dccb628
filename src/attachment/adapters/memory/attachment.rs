//! In-memory repository for attachment metadata.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::attachment::{
    domain::{Attachment, AttachmentId},
    ports::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory attachment repository.
///
/// Soft-deleted records are retained so version numbering stays monotonic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentRepository {
    attachments: Arc<RwLock<Vec<Attachment>>>,
}

impl InMemoryAttachmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> AttachmentRepositoryError {
    AttachmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AttachmentRepository for InMemoryAttachmentRepository {
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()> {
        let mut attachments = self.attachments.write().map_err(lock_error)?;
        if attachments
            .iter()
            .any(|existing| existing.id() == attachment.id())
        {
            return Err(AttachmentRepositoryError::DuplicateAttachment(
                attachment.id(),
            ));
        }
        if attachments.iter().any(|existing| {
            existing.task_id() == attachment.task_id()
                && existing.original_filename() == attachment.original_filename()
                && existing.version() == attachment.version()
        }) {
            return Err(AttachmentRepositoryError::duplicate_version(attachment));
        }
        attachments.push(attachment.clone());
        Ok(())
    }

    async fn update(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()> {
        let mut attachments = self.attachments.write().map_err(lock_error)?;
        let slot = attachments
            .iter_mut()
            .find(|existing| existing.id() == attachment.id())
            .ok_or(AttachmentRepositoryError::NotFound(attachment.id()))?;
        *slot = attachment.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: AttachmentId) -> AttachmentRepositoryResult<Option<Attachment>> {
        let attachments = self.attachments.read().map_err(lock_error)?;
        Ok(attachments
            .iter()
            .find(|attachment| attachment.id() == id && !attachment.is_deleted())
            .cloned())
    }

    async fn list_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>> {
        let attachments = self.attachments.read().map_err(lock_error)?;
        let mut listed: Vec<Attachment> = attachments
            .iter()
            .rev()
            .filter(|attachment| attachment.task_id() == task_id && !attachment.is_deleted())
            .cloned()
            .collect();
        listed.sort_by_key(|attachment| std::cmp::Reverse(attachment.created_at()));
        Ok(listed)
    }

    async fn max_version(
        &self,
        task_id: TaskId,
        original_filename: &str,
    ) -> AttachmentRepositoryResult<Option<u32>> {
        let attachments = self.attachments.read().map_err(lock_error)?;
        Ok(attachments
            .iter()
            .filter(|attachment| {
                attachment.task_id() == task_id
                    && attachment.original_filename() == original_filename
            })
            .map(Attachment::version)
            .max())
    }
}
