//! Repository port for task persistence, lookup, and dependency edges.

use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId, TaskPriority, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Optional narrowing applied to project task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks in this status.
    pub status: Option<TaskStatus>,
    /// Only tasks with this priority.
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// No filtering.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            status: None,
            priority: None,
        }
    }

    /// Only tasks in `status`.
    #[must_use]
    pub const fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            priority: None,
        }
    }

    /// Only tasks with `priority`.
    #[must_use]
    pub const fn with_priority(priority: TaskPriority) -> Self {
        Self {
            status: None,
            priority: Some(priority),
        }
    }

    /// Returns whether `task` passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
    }
}

/// Task persistence contract.
///
/// Lookups and listings only see live (not soft-deleted) tasks. Listings are
/// ordered newest first.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task, including soft-deletion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a live task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds every live task among `ids`, preserving the order of `ids`.
    async fn find_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists live tasks of a project matching `filter`.
    async fn list_by_project(
        &self,
        project_id: ProjectId,
        filter: TaskFilter,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists live tasks owned by a user.
    async fn list_by_owner(&self, owner_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Soft-deletes every live task of a project, returning how many changed.
    async fn soft_delete_by_project(
        &self,
        project_id: ProjectId,
        deleted_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<u64>;

    /// Inserts the edge `task_id -> dependency_id` if absent.
    ///
    /// `dependency_id` is not required to reference an existing task.
    async fn add_dependency(&self, task_id: TaskId, dependency_id: TaskId)
    -> TaskRepositoryResult<()>;

    /// Removes the edge `task_id -> dependency_id` if present.
    async fn remove_dependency(
        &self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> TaskRepositoryResult<()>;

    /// Returns the targets of every edge leaving `task_id`, in insertion order.
    async fn dependency_ids(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskId>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
