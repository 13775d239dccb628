//! Diesel row models for attachment persistence.

use super::schema::attachments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for attachment records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttachmentRow {
    /// Internal attachment identifier.
    pub id: uuid::Uuid,
    /// Stored filename.
    pub filename: String,
    /// Client-supplied filename.
    pub original_filename: String,
    /// Blob path.
    pub file_path: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub file_size: i64,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Uploading user.
    pub uploader_id: uuid::Uuid,
    /// Review status.
    pub status: String,
    /// Version.
    pub version: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Update model for mutable attachment columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = attachments)]
#[diesel(treat_none_as_null = true)]
pub struct AttachmentChangeset {
    /// Review status.
    pub status: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}
