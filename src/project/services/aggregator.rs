//! Service layer for project lifecycle, cascading deletes and metrics.

use crate::identity::domain::Actor;
use crate::project::{
    domain::{
        NewProject, Project, ProjectChanges, ProjectDomainError, ProjectId, ProjectMetrics,
        ProjectStatus,
    },
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::Task,
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl CreateProjectRequest {
    /// Creates a request with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date: None,
            end_date: None,
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

    /// Sets the planned end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Returns the requested name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the requested start date.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the requested end date.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

/// A project together with its live tasks, oldest task first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOverview {
    /// The project record.
    pub project: Project,
    /// Live tasks in creation order.
    pub tasks: Vec<Task>,
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// The project does not exist or has been deleted.
    #[error("project not found: {0}")]
    NotFound(ProjectId),
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
///
/// Owns the project lifecycle and the aggregate views computed over a
/// project's tasks.
#[derive(Clone)]
pub struct ProjectAggregatorService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<P, T, C> ProjectAggregatorService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tasks,
            clock,
        }
    }

    /// Creates a pending project owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] for a blank name or
    /// [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let project = Project::new(
            NewProject {
                name: request.name,
                description: request.description,
                start_date: request.start_date,
                end_date: request.end_date,
            },
            actor.user_id(),
            &*self.clock,
        )?;
        self.projects.store(&project).await?;
        info!(project_id = %project.id(), owner_id = %project.owner_id(), "project created");
        Ok(project)
    }

    /// Merges `changes` into an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project is absent.
    pub async fn update(
        &self,
        id: ProjectId,
        changes: ProjectChanges,
    ) -> ProjectServiceResult<Project> {
        let mut project = self.require(id).await?;
        project.apply(changes, &*self.clock)?;
        self.projects.update(&project).await?;
        debug!(project_id = %id, "project updated");
        Ok(project)
    }

    /// Returns the project with its live tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when a repository lookup fails.
    pub async fn find_by_id(&self, id: ProjectId) -> ProjectServiceResult<Option<ProjectOverview>> {
        let Some(project) = self.projects.find_by_id(id).await? else {
            return Ok(None);
        };
        let mut tasks = self.tasks.list_by_project(id, TaskFilter::all()).await?;
        tasks.reverse();
        Ok(Some(ProjectOverview { project, tasks }))
    }

    /// Lists live projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when the lookup fails.
    pub async fn list_all(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.list(None).await?)
    }

    /// Lists live projects in `status`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when the lookup fails.
    pub async fn list_by_status(&self, status: ProjectStatus) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.list(Some(status)).await?)
    }

    /// Moves a project to the archived status.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project is absent.
    pub async fn archive(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        let mut project = self.require(id).await?;
        project.archive(&*self.clock);
        self.projects.update(&project).await?;
        info!(project_id = %id, "project archived");
        Ok(project)
    }

    /// Soft-deletes a project, then soft-deletes its live tasks.
    ///
    /// The two steps are independent writes; a failure in the second leaves
    /// the project deleted and its tasks live.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project is absent.
    pub async fn delete(&self, id: ProjectId) -> ProjectServiceResult<()> {
        let mut project = self.require(id).await?;
        project.soft_delete(&*self.clock);
        self.projects.update(&project).await?;
        let cascaded = match project.deleted_at() {
            Some(deleted_at) => self.tasks.soft_delete_by_project(id, deleted_at).await?,
            None => 0,
        };
        info!(project_id = %id, cascaded_tasks = cascaded, "project deleted");
        Ok(())
    }

    /// Computes task counts and the completion percentage for a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project is absent.
    pub async fn metrics(&self, id: ProjectId) -> ProjectServiceResult<ProjectMetrics> {
        self.require(id).await?;
        let tasks = self.tasks.list_by_project(id, TaskFilter::all()).await?;
        Ok(ProjectMetrics::from_statuses(tasks.iter().map(Task::status)))
    }

    async fn require(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))
    }
}
