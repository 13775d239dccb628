//! Task record and its mutation rules.

use super::{Hours, TaskDomainError, TaskId, TaskPriority, TaskStatus};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A unit of work inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    completed_date: Option<NaiveDate>,
    estimated_hours: Option<Hours>,
    actual_hours: Hours,
    tags: Option<BTreeSet<String>>,
    project_id: ProjectId,
    owner_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Fields supplied when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned due date.
    pub due_date: Option<NaiveDate>,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Estimated effort.
    pub estimated_hours: Option<Hours>,
    /// Free-form tags.
    pub tags: Option<BTreeSet<String>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted start date.
    pub start_date: Option<NaiveDate>,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted completion date.
    pub completed_date: Option<NaiveDate>,
    /// Persisted estimate.
    pub estimated_hours: Option<Hours>,
    /// Persisted logged hours.
    pub actual_hours: Hours,
    /// Persisted tags.
    pub tags: Option<BTreeSet<String>>,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted owner.
    pub owner_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A partial update to a task. Fields left untouched keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    start_date: Option<Option<NaiveDate>>,
    due_date: Option<Option<NaiveDate>>,
    estimated_hours: Option<Option<Hours>>,
    tags: Option<Option<BTreeSet<String>>>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets or clears the estimate.
    #[must_use]
    pub const fn with_estimated_hours(mut self, estimated_hours: Option<Hours>) -> Self {
        self.estimated_hours = Some(estimated_hours);
        self
    }

    /// Sets or clears the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Option<BTreeSet<String>>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Returns the title that would be applied, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the start date that would be applied, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<Option<NaiveDate>> {
        self.start_date
    }

    /// Returns the due date that would be applied, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<Option<NaiveDate>> {
        self.due_date
    }
}

impl Task {
    /// Creates a pending task owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        new_task: NewTask,
        owner_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = normalize_title(new_task.title)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            description: new_task.description,
            status: TaskStatus::Pending,
            priority: new_task.priority,
            start_date: new_task.start_date,
            due_date: new_task.due_date,
            completed_date: None,
            estimated_hours: new_task.estimated_hours,
            actual_hours: Hours::ZERO,
            tags: new_task.tags,
            project_id: new_task.project_id,
            owner_id,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            start_date: data.start_date,
            due_date: data.due_date,
            completed_date: data.completed_date,
            estimated_hours: data.estimated_hours,
            actual_hours: data.actual_hours,
            tags: data.tags,
            project_id: data.project_id,
            owner_id: data.owner_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the planned start date.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the planned due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the date the task was marked complete.
    #[must_use]
    pub const fn completed_date(&self) -> Option<NaiveDate> {
        self.completed_date
    }

    /// Returns the estimated effort.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<Hours> {
        self.estimated_hours
    }

    /// Returns the hours logged so far.
    #[must_use]
    pub const fn actual_hours(&self) -> Hours {
        self.actual_hours
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> Option<&BTreeSet<String>> {
        self.tags.as_ref()
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
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

    /// Returns whether the task has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Merges `changes` into the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the new title is blank
    /// and [`TaskDomainError::DueBeforeStart`] when the resulting due date
    /// precedes the resulting start date. The task is left unchanged on
    /// error.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let TaskChanges {
            title,
            description,
            status,
            priority,
            start_date,
            due_date,
            estimated_hours,
            tags,
        } = changes;

        let normalized_title = title.map(normalize_title).transpose()?;
        if let (Some(start), Some(due)) = (
            start_date.unwrap_or(self.start_date),
            due_date.unwrap_or(self.due_date),
        ) {
            if due < start {
                return Err(TaskDomainError::DueBeforeStart { start, due });
            }
        }

        if let Some(new_title) = normalized_title {
            self.title = new_title;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = start_date {
            self.start_date = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = estimated_hours {
            self.estimated_hours = value;
        }
        if let Some(value) = tags {
            self.tags = value;
        }
        self.touch(clock);
        Ok(())
    }

    /// Marks the task completed as of the clock's current date.
    ///
    /// Prerequisite tasks are not consulted.
    pub fn complete(&mut self, clock: &impl Clock) {
        let now = clock.utc();
        self.status = TaskStatus::Completed;
        self.completed_date = Some(now.date_naive());
        self.updated_at = now;
    }

    /// Adds logged work to the running total.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NonPositiveLoggedHours`] for a zero amount
    /// and [`TaskDomainError::HoursOverflow`] when the total would exceed the
    /// trackable range.
    pub fn log_hours(&mut self, hours: Hours, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if hours.is_zero() {
            return Err(TaskDomainError::NonPositiveLoggedHours);
        }
        self.actual_hours = self
            .actual_hours
            .checked_add(hours)
            .ok_or(TaskDomainError::HoursOverflow)?;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task as soft-deleted.
    pub fn soft_delete(&mut self, clock: &impl Clock) {
        self.soft_delete_at(clock.utc());
    }

    /// Marks the task as soft-deleted at an explicit instant, as done by a
    /// cascading project deletion.
    pub const fn soft_delete_at(&mut self, deleted_at: DateTime<Utc>) {
        self.deleted_at = Some(deleted_at);
        self.updated_at = deleted_at;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_title(title: String) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
