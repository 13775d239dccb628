//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned due date.
    pub due_date: Option<NaiveDate>,
    /// Completion date.
    pub completed_date: Option<NaiveDate>,
    /// Estimated effort in hundredths of an hour.
    pub estimated_hundredths: Option<i64>,
    /// Logged effort in hundredths of an hour.
    pub actual_hundredths: i64,
    /// JSON array of tags.
    pub tags: Option<Value>,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned due date.
    pub due_date: Option<NaiveDate>,
    /// Completion date.
    pub completed_date: Option<NaiveDate>,
    /// Estimated effort in hundredths of an hour.
    pub estimated_hundredths: Option<i64>,
    /// Logged effort in hundredths of an hour.
    pub actual_hundredths: i64,
    /// JSON array of tags.
    pub tags: Option<Value>,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Full-row update model; `None` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned due date.
    pub due_date: Option<NaiveDate>,
    /// Completion date.
    pub completed_date: Option<NaiveDate>,
    /// Estimated effort in hundredths of an hour.
    pub estimated_hundredths: Option<i64>,
    /// Logged effort in hundredths of an hour.
    pub actual_hundredths: i64,
    /// JSON array of tags.
    pub tags: Option<Value>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}
