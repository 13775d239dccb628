//! Service layer for task lifecycle, dependency edges and time tracking.

use crate::attachment::{
    domain::Attachment,
    ports::{AttachmentRepository, AttachmentRepositoryError},
};
use crate::comment::{
    domain::Comment,
    ports::{CommentRepository, CommentRepositoryError},
};
use crate::identity::{
    domain::{Actor, UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{
        Hours, NewTask, Task, TaskChanges, TaskDomainError, TaskId, TaskPriority, TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    title: String,
    project_id: ProjectId,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    priority: TaskPriority,
    estimated_hours: Option<f64>,
    tags: Option<BTreeSet<String>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title and project.
    #[must_use]
    pub fn new(title: impl Into<String>, project_id: ProjectId) -> Self {
        Self {
            title: title.into(),
            project_id,
            description: None,
            start_date: None,
            due_date: None,
            priority: TaskPriority::default(),
            estimated_hours: None,
            tags: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the planned start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the planned due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority; defaults to medium.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the estimated effort in hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the requested title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the target project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the requested start date.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the requested due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the requested estimate.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<f64> {
        self.estimated_hours
    }
}

/// A task with everything shown on its detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDetails {
    /// The task record.
    pub task: Task,
    /// Every comment on the task, oldest first.
    pub comments: Vec<Comment>,
    /// Live attachments, newest first.
    pub attachments: Vec<Attachment>,
    /// Live prerequisite tasks.
    pub dependencies: Vec<Task>,
    /// The owner's profile, when the directory knows the user.
    pub owner: Option<UserProfile>,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Comment lookup failed.
    #[error(transparent)]
    CommentRepository(#[from] CommentRepositoryError),
    /// Attachment lookup failed.
    #[error(transparent)]
    AttachmentRepository(#[from] AttachmentRepositoryError),
    /// User directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// The task does not exist or has been deleted.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task graph orchestration service.
#[derive(Clone)]
pub struct TaskGraphService<T, Cm, A, U, C>
where
    T: TaskRepository,
    Cm: CommentRepository,
    A: AttachmentRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    comments: Arc<Cm>,
    attachments: Arc<A>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, Cm, A, U, C> TaskGraphService<T, Cm, A, U, C>
where
    T: TaskRepository,
    Cm: CommentRepository,
    A: AttachmentRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task graph service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        comments: Arc<Cm>,
        attachments: Arc<A>,
        users: Arc<U>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            comments,
            attachments,
            users,
            clock,
        }
    }

    /// Creates a pending task owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a blank title or an invalid
    /// estimate, and [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(&self, actor: &Actor, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let estimated_hours = request.estimated_hours.map(Hours::from_f64).transpose()?;
        let task = Task::new(
            NewTask {
                title: request.title,
                project_id: request.project_id,
                description: request.description,
                start_date: request.start_date,
                due_date: request.due_date,
                priority: request.priority,
                estimated_hours,
                tags: request.tags,
            },
            actor.user_id(),
            &*self.clock,
        )?;
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), project_id = %task.project_id(), "task created");
        Ok(task)
    }

    /// Merges `changes` into an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent.
    pub async fn update(&self, id: TaskId, changes: TaskChanges) -> TaskServiceResult<Task> {
        let mut task = self.require(id).await?;
        task.apply(changes, &*self.clock)?;
        self.tasks.update(&task).await?;
        debug!(task_id = %id, "task updated");
        Ok(task)
    }

    /// Returns the task with its comments, attachments, prerequisites and
    /// owner profile.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when any lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskServiceResult<Option<TaskDetails>> {
        let Some(task) = self.tasks.find_by_id(id).await? else {
            return Ok(None);
        };
        let comments = self.comments.list_by_task(id).await?;
        let attachments = self.attachments.list_by_task(id).await?;
        let dependency_ids = self.tasks.dependency_ids(id).await?;
        let dependencies = self.tasks.find_many(&dependency_ids).await?;
        let owner = self.users.find_by_id(task.owner_id()).await?;
        Ok(Some(TaskDetails {
            task,
            comments,
            attachments,
            dependencies,
            owner,
        }))
    }

    /// Lists live tasks of a project, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskServiceResult<Vec<Task>> {
        Ok(self
            .tasks
            .list_by_project(project_id, TaskFilter::all())
            .await?)
    }

    /// Lists live tasks of a project in `status`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_by_status(
        &self,
        project_id: ProjectId,
        status: TaskStatus,
    ) -> TaskServiceResult<Vec<Task>> {
        Ok(self
            .tasks
            .list_by_project(project_id, TaskFilter::with_status(status))
            .await?)
    }

    /// Lists live tasks of a project with `priority`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_by_priority(
        &self,
        project_id: ProjectId,
        priority: TaskPriority,
    ) -> TaskServiceResult<Vec<Task>> {
        Ok(self
            .tasks
            .list_by_project(project_id, TaskFilter::with_priority(priority))
            .await?)
    }

    /// Lists live tasks owned by `user_id` across projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_by_user(&self, user_id: UserId) -> TaskServiceResult<Vec<Task>> {
        Ok(self.tasks.list_by_owner(user_id).await?)
    }

    /// Marks a task completed today.
    ///
    /// Open prerequisites do not block completion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent.
    pub async fn complete(&self, id: TaskId) -> TaskServiceResult<Task> {
        let mut task = self.require(id).await?;
        task.complete(&*self.clock);
        self.tasks.update(&task).await?;
        info!(task_id = %id, "task completed");
        Ok(task)
    }

    /// Records that `task_id` depends on `dependency_id`.
    ///
    /// Adding an existing edge is a no-op. The prerequisite is not checked
    /// for existence, self-reference or cycles.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when `task_id` is absent.
    pub async fn add_dependency(
        &self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> TaskServiceResult<()> {
        self.require(task_id).await?;
        self.tasks.add_dependency(task_id, dependency_id).await?;
        debug!(task_id = %task_id, dependency_id = %dependency_id, "dependency added");
        Ok(())
    }

    /// Removes the edge from `task_id` to `dependency_id`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when `task_id` is absent.
    pub async fn remove_dependency(
        &self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> TaskServiceResult<()> {
        self.require(task_id).await?;
        self.tasks.remove_dependency(task_id, dependency_id).await?;
        debug!(task_id = %task_id, dependency_id = %dependency_id, "dependency removed");
        Ok(())
    }

    /// Returns the prerequisite identifiers recorded for a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent.
    pub async fn dependency_ids(&self, task_id: TaskId) -> TaskServiceResult<Vec<TaskId>> {
        self.require(task_id).await?;
        Ok(self.tasks.dependency_ids(task_id).await?)
    }

    /// Adds `hours` of logged work to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent and
    /// [`TaskServiceError::Domain`] when `hours` is zero.
    pub async fn log_hours(&self, id: TaskId, hours: Hours) -> TaskServiceResult<Task> {
        let mut task = self.require(id).await?;
        task.log_hours(hours, &*self.clock)?;
        self.tasks.update(&task).await?;
        debug!(task_id = %id, logged = %hours, total = %task.actual_hours(), "hours logged");
        Ok(task)
    }

    /// Soft-deletes a task. Its comments and attachments are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        let mut task = self.require(id).await?;
        task.soft_delete(&*self.clock);
        self.tasks.update(&task).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    async fn require(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }
}
