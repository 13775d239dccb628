//! `PostgreSQL` repository implementation for attachment metadata.

use super::{
    models::{AttachmentChangeset, AttachmentRow},
    schema::attachments,
};
use crate::attachment::{
    domain::{Attachment, AttachmentId, AttachmentStatus, PersistedAttachmentData},
    ports::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult},
};
use crate::identity::domain::UserId;
use crate::postgres::{PgPool, run_blocking_with};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::dsl::max;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Unique constraint over `(task_id, original_filename, version)`.
const VERSION_CONSTRAINT: &str = "attachments_task_file_version_key";

/// `PostgreSQL`-backed attachment repository.
#[derive(Debug, Clone)]
pub struct PostgresAttachmentRepository {
    pool: PgPool,
}

impl PostgresAttachmentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AttachmentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AttachmentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = pool
                    .get()
                    .map_err(AttachmentRepositoryError::persistence)?;
                f(&mut connection)
            },
            AttachmentRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl AttachmentRepository for PostgresAttachmentRepository {
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()> {
        let attachment_id = attachment.id();
        let version_conflict = AttachmentRepositoryError::duplicate_version(attachment);
        let row = to_row(attachment)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(attachments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
                        if info.constraint_name() == Some(VERSION_CONSTRAINT) =>
                    {
                        version_conflict
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AttachmentRepositoryError::DuplicateAttachment(attachment_id)
                    }
                    _ => AttachmentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()> {
        let attachment_id = attachment.id();
        let changeset = AttachmentChangeset {
            status: attachment.status().as_str().to_owned(),
            updated_at: attachment.updated_at(),
            deleted_at: attachment.deleted_at(),
        };

        self.run_blocking(move |connection| {
            let target = attachments::table.filter(attachments::id.eq(attachment_id.into_inner()));
            let updated = diesel::update(target)
                .set(&changeset)
                .execute(connection)
                .map_err(AttachmentRepositoryError::persistence)?;
            if updated == 0 {
                return Err(AttachmentRepositoryError::NotFound(attachment_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: AttachmentId) -> AttachmentRepositoryResult<Option<Attachment>> {
        self.run_blocking(move |connection| {
            let row = attachments::table
                .filter(attachments::id.eq(id.into_inner()))
                .filter(attachments::deleted_at.is_null())
                .select(AttachmentRow::as_select())
                .first::<AttachmentRow>(connection)
                .optional()
                .map_err(AttachmentRepositoryError::persistence)?;
            row.map(row_to_attachment).transpose()
        })
        .await
    }

    async fn list_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>> {
        self.run_blocking(move |connection| {
            let rows = attachments::table
                .filter(attachments::task_id.eq(task_id.into_inner()))
                .filter(attachments::deleted_at.is_null())
                .order(attachments::created_at.desc())
                .select(AttachmentRow::as_select())
                .load::<AttachmentRow>(connection)
                .map_err(AttachmentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_attachment).collect()
        })
        .await
    }

    async fn max_version(
        &self,
        task_id: TaskId,
        original_filename: &str,
    ) -> AttachmentRepositoryResult<Option<u32>> {
        let name = original_filename.to_owned();
        self.run_blocking(move |connection| {
            let highest = attachments::table
                .filter(attachments::task_id.eq(task_id.into_inner()))
                .filter(attachments::original_filename.eq(name))
                .select(max(attachments::version))
                .first::<Option<i32>>(connection)
                .map_err(AttachmentRepositoryError::persistence)?;
            highest
                .map(u32::try_from)
                .transpose()
                .map_err(AttachmentRepositoryError::invalid_persisted_data)
        })
        .await
    }
}

fn to_row(attachment: &Attachment) -> AttachmentRepositoryResult<AttachmentRow> {
    Ok(AttachmentRow {
        id: attachment.id().into_inner(),
        filename: attachment.filename().to_owned(),
        original_filename: attachment.original_filename().to_owned(),
        file_path: attachment.file_path().to_owned(),
        mime_type: attachment.mime_type().to_owned(),
        file_size: i64::try_from(attachment.file_size())
            .map_err(AttachmentRepositoryError::persistence)?,
        task_id: attachment.task_id().into_inner(),
        uploader_id: attachment.uploader_id().into_inner(),
        status: attachment.status().as_str().to_owned(),
        version: i32::try_from(attachment.version())
            .map_err(AttachmentRepositoryError::persistence)?,
        created_at: attachment.created_at(),
        updated_at: attachment.updated_at(),
        deleted_at: attachment.deleted_at(),
    })
}

fn row_to_attachment(row: AttachmentRow) -> AttachmentRepositoryResult<Attachment> {
    let status = AttachmentStatus::try_from(row.status.as_str())
        .map_err(AttachmentRepositoryError::invalid_persisted_data)?;
    let file_size =
        u64::try_from(row.file_size).map_err(AttachmentRepositoryError::invalid_persisted_data)?;
    let version =
        u32::try_from(row.version).map_err(AttachmentRepositoryError::invalid_persisted_data)?;

    Ok(Attachment::from_persisted(PersistedAttachmentData {
        id: AttachmentId::from_uuid(row.id),
        filename: row.filename,
        original_filename: row.original_filename,
        file_path: row.file_path,
        mime_type: row.mime_type,
        file_size,
        task_id: TaskId::from_uuid(row.task_id),
        uploader_id: UserId::from_uuid(row.uploader_id),
        status,
        version,
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    }))
}
