//! `PostgreSQL` repository implementation for comment storage.

use super::{
    models::{CommentChangeset, CommentRow},
    schema::comments,
};
use crate::comment::{
    domain::{Comment, CommentId, EditRecord, PersistedCommentData},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use crate::identity::domain::UserId;
use crate::postgres::{PgPool, run_blocking_with};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;
use std::collections::BTreeSet;

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = pool.get().map_err(CommentRepositoryError::persistence)?;
                f(&mut connection)
            },
            CommentRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let row = to_row(comment)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CommentRepositoryError::DuplicateComment(comment_id)
                    }
                    _ => CommentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let changeset = CommentChangeset {
            content: comment.content().to_owned(),
            mentioned_users: mentions_to_column(comment.mentioned_users())?,
            edit_history: history_to_column(comment.edit_history())?,
            updated_at: comment.updated_at(),
        };

        self.run_blocking(move |connection| {
            let target = comments::table.filter(comments::id.eq(comment_id.into_inner()));
            let updated = diesel::update(target)
                .set(&changeset)
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            if updated == 0 {
                return Err(CommentRepositoryError::NotFound(comment_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        self.run_blocking(move |connection| {
            let row = comments::table
                .filter(comments::id.eq(id.into_inner()))
                .select(CommentRow::as_select())
                .first::<CommentRow>(connection)
                .optional()
                .map_err(CommentRepositoryError::persistence)?;
            row.map(row_to_comment).transpose()
        })
        .await
    }

    async fn list_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .filter(comments::task_id.eq(task_id.into_inner()))
                .order(comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }

    async fn list_replies(&self, parent_id: CommentId) -> CommentRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .filter(comments::parent_id.eq(parent_id.into_inner()))
                .order(comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }

    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(comments::table.filter(comments::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            if removed == 0 {
                return Err(CommentRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn mentions_to_column(
    mentions: Option<&BTreeSet<UserId>>,
) -> CommentRepositoryResult<Option<Value>> {
    mentions
        .map(serde_json::to_value)
        .transpose()
        .map_err(CommentRepositoryError::persistence)
}

fn history_to_column(history: &[EditRecord]) -> CommentRepositoryResult<Value> {
    serde_json::to_value(history).map_err(CommentRepositoryError::persistence)
}

fn to_row(comment: &Comment) -> CommentRepositoryResult<CommentRow> {
    Ok(CommentRow {
        id: comment.id().into_inner(),
        content: comment.content().to_owned(),
        task_id: comment.task_id().into_inner(),
        author_id: comment.author_id().into_inner(),
        parent_id: comment.parent_id().map(CommentId::into_inner),
        mentioned_users: mentions_to_column(comment.mentioned_users())?,
        edit_history: history_to_column(comment.edit_history())?,
        created_at: comment.created_at(),
        updated_at: comment.updated_at(),
    })
}

fn row_to_comment(row: CommentRow) -> CommentRepositoryResult<Comment> {
    let mentioned_users = row
        .mentioned_users
        .map(serde_json::from_value::<BTreeSet<UserId>>)
        .transpose()
        .map_err(CommentRepositoryError::invalid_persisted_data)?;
    let edit_history = serde_json::from_value::<Vec<EditRecord>>(row.edit_history)
        .map_err(CommentRepositoryError::invalid_persisted_data)?;

    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        content: row.content,
        task_id: TaskId::from_uuid(row.task_id),
        author_id: UserId::from_uuid(row.author_id),
        parent_id: row.parent_id.map(CommentId::from_uuid),
        mentioned_users,
        edit_history,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
