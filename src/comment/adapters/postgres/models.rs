//! Diesel row models for comment persistence.

use super::schema::comments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for comment records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Internal comment identifier.
    pub id: uuid::Uuid,
    /// Comment body.
    pub content: String,
    /// Task being discussed.
    pub task_id: uuid::Uuid,
    /// Authoring user.
    pub author_id: uuid::Uuid,
    /// Parent comment.
    pub parent_id: Option<uuid::Uuid>,
    /// JSON array of mentioned users.
    pub mentioned_users: Option<Value>,
    /// JSON array of edit records.
    pub edit_history: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model for edits; `None` clears mentions.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = comments)]
#[diesel(treat_none_as_null = true)]
pub struct CommentChangeset {
    /// Comment body.
    pub content: String,
    /// JSON array of mentioned users.
    pub mentioned_users: Option<Value>,
    /// JSON array of edit records.
    pub edit_history: Value,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
