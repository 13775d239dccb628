//! Shared world state for project deletion BDD scenarios.

use std::sync::Arc;

use atelier::attachment::adapters::memory::InMemoryAttachmentRepository;
use atelier::comment::adapters::memory::InMemoryCommentRepository;
use atelier::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Actor, UserId},
};
use atelier::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{ProjectId, ProjectMetrics},
    services::{ProjectAggregatorService, ProjectServiceError},
};
use atelier::task::{
    adapters::memory::InMemoryTaskRepository, domain::Task, services::TaskGraphService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Project service used by the BDD world.
pub type TestProjectService =
    ProjectAggregatorService<InMemoryProjectRepository, InMemoryTaskRepository, DefaultClock>;

/// Task service used by the BDD world.
pub type TestTaskService = TaskGraphService<
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    InMemoryAttachmentRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Scenario world for project deletion behaviour tests.
pub struct ProjectWorld {
    pub projects: TestProjectService,
    pub tasks: TestTaskService,
    pub owner: Actor,
    pub project_id: Option<ProjectId>,
    pub seeded_tasks: Vec<Task>,
    pub last_metrics: Option<Result<ProjectMetrics, ProjectServiceError>>,
}

impl ProjectWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let task_repo = Arc::new(InMemoryTaskRepository::new());

        Self {
            projects: ProjectAggregatorService::new(
                Arc::new(InMemoryProjectRepository::new()),
                Arc::clone(&task_repo),
                Arc::clone(&clock),
            ),
            tasks: TaskGraphService::new(
                task_repo,
                Arc::new(InMemoryCommentRepository::new()),
                Arc::new(InMemoryAttachmentRepository::new()),
                Arc::new(InMemoryUserDirectory::new()),
                clock,
            ),
            owner: Actor::new(UserId::new()),
            project_id: None,
            seeded_tasks: Vec::new(),
            last_metrics: None,
        }
    }

    /// Returns the seeded project identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no project has been created.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project_id
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }
}

impl Default for ProjectWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectWorld {
    ProjectWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
