//! Attachment record, review status and blob naming.

use super::{AttachmentDomainError, AttachmentId, ParseAttachmentStatusError};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Accepted.
    Approved,
    /// Declined.
    Rejected,
}

impl AttachmentStatus {
    /// Every status.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl TryFrom<&str> for AttachmentStatus {
    type Error = ParseAttachmentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseAttachmentStatusError(value.to_owned()))
    }
}

impl fmt::Display for AttachmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the stored filename `<unix-seconds>_<attachment-id>_<original>`.
///
/// The identifier makes every upload's blob path its own, whatever version
/// the record ends up with. Path separators in `original_filename` are
/// replaced with `_` so the stored name is always a single path component.
#[must_use]
pub fn stored_filename(
    uploaded_at: DateTime<Utc>,
    id: AttachmentId,
    original_filename: &str,
) -> String {
    let sanitized: String = original_filename
        .chars()
        .map(|ch| if matches!(ch, '/' | '\\') { '_' } else { ch })
        .collect();
    format!("{}_{id}_{sanitized}", uploaded_at.timestamp())
}

/// Builds the blob path for a stored filename.
#[must_use]
pub fn blob_path(task_id: TaskId, filename: &str) -> String {
    format!("attachments/tasks/{task_id}/{filename}")
}

/// Metadata for one version of one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    filename: String,
    original_filename: String,
    file_path: String,
    mime_type: String,
    file_size: u64,
    task_id: TaskId,
    uploader_id: UserId,
    status: AttachmentStatus,
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Fields supplied when recording an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    /// Client-supplied filename.
    pub original_filename: String,
    /// Client-supplied MIME type.
    pub mime_type: String,
    /// Size of the stored bytes.
    pub file_size: u64,
    /// Task the file belongs to.
    pub task_id: TaskId,
    /// Version assigned to this upload.
    pub version: u32,
}

/// Parameter object for reconstructing a persisted attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAttachmentData {
    /// Persisted identifier.
    pub id: AttachmentId,
    /// Persisted stored filename.
    pub filename: String,
    /// Persisted original filename.
    pub original_filename: String,
    /// Persisted blob path.
    pub file_path: String,
    /// Persisted MIME type.
    pub mime_type: String,
    /// Persisted size in bytes.
    pub file_size: u64,
    /// Persisted task.
    pub task_id: TaskId,
    /// Persisted uploader.
    pub uploader_id: UserId,
    /// Persisted review status.
    pub status: AttachmentStatus,
    /// Persisted version.
    pub version: u32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Attachment {
    /// Creates a pending attachment record uploaded by `uploader_id`.
    ///
    /// The stored filename and blob path are derived from the clock reading
    /// used for `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentDomainError::EmptyFilename`] for a blank name and
    /// [`AttachmentDomainError::ZeroVersion`] for version zero.
    pub fn new(
        new_attachment: NewAttachment,
        uploader_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, AttachmentDomainError> {
        if new_attachment.original_filename.trim().is_empty() {
            return Err(AttachmentDomainError::EmptyFilename);
        }
        if new_attachment.version == 0 {
            return Err(AttachmentDomainError::ZeroVersion);
        }
        let id = AttachmentId::new();
        let timestamp = clock.utc();
        let filename = stored_filename(timestamp, id, &new_attachment.original_filename);
        let file_path = blob_path(new_attachment.task_id, &filename);
        Ok(Self {
            id,
            filename,
            original_filename: new_attachment.original_filename,
            file_path,
            mime_type: new_attachment.mime_type,
            file_size: new_attachment.file_size,
            task_id: new_attachment.task_id,
            uploader_id,
            status: AttachmentStatus::Pending,
            version: new_attachment.version,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Reconstructs an attachment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAttachmentData) -> Self {
        Self {
            id: data.id,
            filename: data.filename,
            original_filename: data.original_filename,
            file_path: data.file_path,
            mime_type: data.mime_type,
            file_size: data.file_size,
            task_id: data.task_id,
            uploader_id: data.uploader_id,
            status: data.status,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the stored filename.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the client-supplied filename.
    #[must_use]
    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    /// Returns the blob path.
    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the size in bytes.
    #[must_use]
    pub const fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the uploader.
    #[must_use]
    pub const fn uploader_id(&self) -> UserId {
        self.uploader_id
    }

    /// Returns the review status.
    #[must_use]
    pub const fn status(&self) -> AttachmentStatus {
        self.status
    }

    /// Returns the version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-deletion timestamp.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns whether the record has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Gives a not yet stored record a different version number.
    ///
    /// The stored filename and blob path do not depend on the version and
    /// are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentDomainError::ZeroVersion`] for version zero.
    pub const fn reassign_version(&mut self, version: u32) -> Result<(), AttachmentDomainError> {
        if version == 0 {
            return Err(AttachmentDomainError::ZeroVersion);
        }
        self.version = version;
        Ok(())
    }

    /// Replaces the review status.
    pub fn set_status(&mut self, status: AttachmentStatus, clock: &impl Clock) {
        self.status = status;
        self.updated_at = clock.utc();
    }

    /// Marks the record as soft-deleted.
    pub fn soft_delete(&mut self, clock: &impl Clock) {
        let now = clock.utc();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}
