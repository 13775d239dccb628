//! Service layer coordinating blob writes with attachment metadata.

use crate::attachment::{
    domain::{Attachment, AttachmentDomainError, AttachmentId, AttachmentStatus, NewAttachment},
    ports::{AttachmentRepository, AttachmentRepositoryError, BlobStore, BlobStoreError},
};
use crate::identity::{
    domain::{Actor, UserProfile},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::task::domain::TaskId;
use camino::{Utf8Path, Utf8PathBuf};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Attempts at recording an upload before a version conflict is reported.
const MAX_RECORD_ATTEMPTS: usize = 3;

/// An uploaded file awaiting storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    bytes: Vec<u8>,
    original_filename: String,
    mime_type: String,
    task_id: TaskId,
}

impl UploadRequest {
    /// Creates an upload request.
    #[must_use]
    pub fn new(
        bytes: impl Into<Vec<u8>>,
        original_filename: impl Into<String>,
        mime_type: impl Into<String>,
        task_id: TaskId,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            original_filename: original_filename.into(),
            mime_type: mime_type.into(),
            task_id,
        }
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the client-supplied filename.
    #[must_use]
    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    /// Returns the target task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// An attachment with its uploader's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentDetails {
    /// The attachment record.
    pub attachment: Attachment,
    /// The uploader's profile, when known.
    pub uploader: Option<UserProfile>,
}

/// Service-level errors for attachment operations.
#[derive(Debug, Error)]
pub enum AttachmentServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AttachmentDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AttachmentRepositoryError),
    /// Blob storage failed.
    #[error(transparent)]
    Storage(#[from] BlobStoreError),
    /// User directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// The attachment does not exist or has been deleted.
    #[error("attachment not found: {0}")]
    NotFound(AttachmentId),
}

/// Result type for attachment service operations.
pub type AttachmentServiceResult<T> = Result<T, AttachmentServiceError>;

/// Attachment orchestration service.
#[derive(Clone)]
pub struct AttachmentStoreService<A, B, U, C>
where
    A: AttachmentRepository,
    B: BlobStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    attachments: Arc<A>,
    blobs: Arc<B>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<A, B, U, C> AttachmentStoreService<A, B, U, C>
where
    A: AttachmentRepository,
    B: BlobStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new attachment service.
    #[must_use]
    pub const fn new(attachments: Arc<A>, blobs: Arc<B>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            attachments,
            blobs,
            users,
            clock,
        }
    }

    /// Stores the uploaded bytes and records the next version of the file.
    ///
    /// The blob is written first, under a path unique to this upload. If that
    /// write fails no record is created; if recording fails the blob is
    /// removed again. A version claimed by a concurrent upload of the same
    /// file is replaced by the next free one before giving up.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::Storage`] when the blob write fails
    /// and [`AttachmentServiceError::Repository`] when recording fails.
    pub async fn upload(
        &self,
        actor: &Actor,
        request: UploadRequest,
    ) -> AttachmentServiceResult<Attachment> {
        let UploadRequest {
            bytes,
            original_filename,
            mime_type,
            task_id,
        } = request;

        let version = self.next_version(task_id, &original_filename).await?;
        let file_size =
            u64::try_from(bytes.len()).map_err(|_| AttachmentDomainError::FileTooLarge)?;
        let mut attachment = Attachment::new(
            NewAttachment {
                original_filename,
                mime_type,
                file_size,
                task_id,
                version,
            },
            actor.user_id(),
            &*self.clock,
        )?;

        let path = Utf8PathBuf::from(attachment.file_path());
        self.blobs.put(&path, &bytes).await?;
        if let Err(err) = self.record(&mut attachment).await {
            if let Err(cleanup) = self.blobs.delete(&path).await {
                warn!(path = %path, error = %cleanup, "failed to remove orphaned blob");
            }
            return Err(err);
        }
        info!(
            attachment_id = %attachment.id(),
            task_id = %task_id,
            version = attachment.version(),
            "attachment uploaded"
        );
        Ok(attachment)
    }

    async fn next_version(
        &self,
        task_id: TaskId,
        original_filename: &str,
    ) -> AttachmentServiceResult<u32> {
        Ok(self
            .attachments
            .max_version(task_id, original_filename)
            .await?
            .map_or(Some(1), |highest| highest.checked_add(1))
            .ok_or(AttachmentDomainError::VersionOverflow)?)
    }

    async fn record(&self, attachment: &mut Attachment) -> AttachmentServiceResult<()> {
        for _ in 1..MAX_RECORD_ATTEMPTS {
            match self.attachments.store(attachment).await {
                Err(AttachmentRepositoryError::DuplicateVersion { version, .. }) => {
                    let next = self
                        .next_version(attachment.task_id(), attachment.original_filename())
                        .await?;
                    debug!(
                        attachment_id = %attachment.id(),
                        taken = version,
                        next,
                        "attachment version already taken"
                    );
                    attachment.reassign_version(next)?;
                }
                other => return other.map_err(AttachmentServiceError::from),
            }
        }
        Ok(self.attachments.store(attachment).await?)
    }

    /// Replaces the review status of an attachment.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::NotFound`] when the attachment is
    /// absent.
    pub async fn update_status(
        &self,
        id: AttachmentId,
        status: AttachmentStatus,
    ) -> AttachmentServiceResult<Attachment> {
        let mut attachment = self.require(id).await?;
        attachment.set_status(status, &*self.clock);
        self.attachments.update(&attachment).await?;
        debug!(attachment_id = %id, status = %status, "attachment status changed");
        Ok(attachment)
    }

    /// Returns an attachment with its uploader's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError`] when a lookup fails.
    pub async fn find_by_id(
        &self,
        id: AttachmentId,
    ) -> AttachmentServiceResult<Option<AttachmentDetails>> {
        let Some(attachment) = self.attachments.find_by_id(id).await? else {
            return Ok(None);
        };
        let uploader = self.users.find_by_id(attachment.uploader_id()).await?;
        Ok(Some(AttachmentDetails {
            attachment,
            uploader,
        }))
    }

    /// Lists live attachments of a task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::Repository`] when the lookup fails.
    pub async fn list_by_task(&self, task_id: TaskId) -> AttachmentServiceResult<Vec<Attachment>> {
        Ok(self.attachments.list_by_task(task_id).await?)
    }

    /// Removes the stored blob and soft-deletes the record.
    ///
    /// Blob removal failures are logged and do not abort the deletion.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::NotFound`] when the attachment is
    /// absent.
    pub async fn delete(&self, id: AttachmentId) -> AttachmentServiceResult<()> {
        let mut attachment = self.require(id).await?;
        let path = Utf8Path::new(attachment.file_path());
        match self.blobs.delete(path).await {
            Ok(true) => {}
            Ok(false) => debug!(attachment_id = %id, path = %path, "blob already absent"),
            Err(err) => warn!(attachment_id = %id, path = %path, error = %err, "blob removal failed"),
        }
        attachment.soft_delete(&*self.clock);
        self.attachments.update(&attachment).await?;
        info!(attachment_id = %id, "attachment deleted");
        Ok(())
    }

    /// Reads the stored bytes of a live attachment.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::NotFound`] when the attachment is
    /// absent and [`AttachmentServiceError::Storage`] when the blob cannot be
    /// read.
    pub async fn read_content(&self, id: AttachmentId) -> AttachmentServiceResult<Vec<u8>> {
        let attachment = self.require(id).await?;
        Ok(self
            .blobs
            .get(Utf8Path::new(attachment.file_path()))
            .await?)
    }

    async fn require(&self, id: AttachmentId) -> AttachmentServiceResult<Attachment> {
        self.attachments
            .find_by_id(id)
            .await?
            .ok_or(AttachmentServiceError::NotFound(id))
    }
}
