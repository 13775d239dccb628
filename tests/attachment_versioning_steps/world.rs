//! Shared world state for attachment versioning BDD scenarios.

use std::sync::Arc;

use atelier::attachment::{
    adapters::{blob::InMemoryBlobStore, memory::InMemoryAttachmentRepository},
    domain::Attachment,
    services::AttachmentStoreService,
};
use atelier::comment::adapters::memory::InMemoryCommentRepository;
use atelier::identity::{adapters::memory::InMemoryUserDirectory, domain::Actor};
use atelier::project::{
    adapters::memory::InMemoryProjectRepository, services::ProjectAggregatorService,
};
use atelier::task::{
    adapters::memory::InMemoryTaskRepository, domain::TaskId, services::TaskGraphService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Attachment service used by the BDD world.
pub type TestAttachmentService = AttachmentStoreService<
    InMemoryAttachmentRepository,
    InMemoryBlobStore,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Task service used to seed scenario tasks.
pub type TestTaskService = TaskGraphService<
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    InMemoryAttachmentRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Project service used to seed scenario projects.
pub type TestProjectService =
    ProjectAggregatorService<InMemoryProjectRepository, InMemoryTaskRepository, DefaultClock>;

/// Scenario world for attachment versioning behaviour tests.
pub struct AttachmentWorld {
    pub attachments: TestAttachmentService,
    pub tasks: TestTaskService,
    pub projects: TestProjectService,
    pub blobs: Arc<InMemoryBlobStore>,
    pub users: Arc<InMemoryUserDirectory>,
    pub uploader: Option<Actor>,
    pub task_id: Option<TaskId>,
    pub uploads: Vec<Attachment>,
}

impl AttachmentWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let attachment_repo = Arc::new(InMemoryAttachmentRepository::new());
        let task_repo = Arc::new(InMemoryTaskRepository::new());
        let blobs = Arc::new(InMemoryBlobStore::new());
        let users = Arc::new(InMemoryUserDirectory::new());

        Self {
            attachments: AttachmentStoreService::new(
                Arc::clone(&attachment_repo),
                Arc::clone(&blobs),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            tasks: TaskGraphService::new(
                Arc::clone(&task_repo),
                Arc::new(InMemoryCommentRepository::new()),
                attachment_repo,
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            projects: ProjectAggregatorService::new(
                Arc::new(InMemoryProjectRepository::new()),
                task_repo,
                clock,
            ),
            blobs,
            users,
            uploader: None,
            task_id: None,
            uploads: Vec::new(),
        }
    }

    /// Returns the seeded uploader and task.
    ///
    /// # Errors
    ///
    /// Returns an error if the background step has not run.
    pub fn seeded(&self) -> Result<(Actor, TaskId), eyre::Report> {
        let uploader = self
            .uploader
            .ok_or_else(|| eyre::eyre!("missing uploader in scenario world"))?;
        let task_id = self
            .task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
        Ok((uploader, task_id))
    }
}

impl Default for AttachmentWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AttachmentWorld {
    AttachmentWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
