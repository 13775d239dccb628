//! Shared wiring for in-memory integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use atelier::attachment::{
    adapters::{blob::InMemoryBlobStore, memory::InMemoryAttachmentRepository},
    services::AttachmentStoreService,
};
use atelier::comment::{adapters::memory::InMemoryCommentRepository, services::CommentThreadService};
use atelier::config::ValidationLimits;
use atelier::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Actor, UserId, UserProfile},
};
use atelier::project::{
    adapters::memory::InMemoryProjectRepository, services::ProjectAggregatorService,
};
use atelier::task::{adapters::memory::InMemoryTaskRepository, services::TaskGraphService};
use atelier::validation::{ReferenceValidator, RequestValidator};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock that advances one second per reading so creation order is
/// observable in listings.
#[derive(Debug)]
pub struct TickingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl TickingClock {
    /// Starts ticking from 2026-04-01 08:00 UTC.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2026, 4, 1, 8, 0, 0)
                .single()
                .unwrap_or_default(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Default for TickingClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TickingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + chrono::Duration::seconds(tick)
    }
}

/// Project service over the in-memory adapters.
pub type Projects =
    ProjectAggregatorService<InMemoryProjectRepository, InMemoryTaskRepository, TickingClock>;

/// Task service over the in-memory adapters.
pub type Tasks = TaskGraphService<
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    InMemoryAttachmentRepository,
    InMemoryUserDirectory,
    TickingClock,
>;

/// Comment service over the in-memory adapters.
pub type Comments =
    CommentThreadService<InMemoryCommentRepository, InMemoryUserDirectory, TickingClock>;

/// Attachment service over the in-memory adapters.
pub type Attachments = AttachmentStoreService<
    InMemoryAttachmentRepository,
    InMemoryBlobStore,
    InMemoryUserDirectory,
    TickingClock,
>;

/// Reference validator over the in-memory adapters.
pub type References = ReferenceValidator<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    InMemoryUserDirectory,
>;

/// Every service wired over one shared set of in-memory stores.
pub struct Tracker {
    pub projects: Projects,
    pub tasks: Tasks,
    pub comments: Comments,
    pub attachments: Attachments,
    pub references: References,
    pub rules: RequestValidator,
    pub blobs: Arc<InMemoryBlobStore>,
    pub users: Arc<InMemoryUserDirectory>,
}

impl Tracker {
    /// Wires the services with standard limits.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(TickingClock::new());
        let project_repo = Arc::new(InMemoryProjectRepository::new());
        let task_repo = Arc::new(InMemoryTaskRepository::new());
        let comment_repo = Arc::new(InMemoryCommentRepository::new());
        let attachment_repo = Arc::new(InMemoryAttachmentRepository::new());
        let blobs = Arc::new(InMemoryBlobStore::new());
        let users = Arc::new(InMemoryUserDirectory::new());

        Self {
            projects: ProjectAggregatorService::new(
                Arc::clone(&project_repo),
                Arc::clone(&task_repo),
                Arc::clone(&clock),
            ),
            tasks: TaskGraphService::new(
                Arc::clone(&task_repo),
                Arc::clone(&comment_repo),
                Arc::clone(&attachment_repo),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            comments: CommentThreadService::new(
                Arc::clone(&comment_repo),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            attachments: AttachmentStoreService::new(
                attachment_repo,
                Arc::clone(&blobs),
                Arc::clone(&users),
                clock,
            ),
            references: ReferenceValidator::new(
                project_repo,
                task_repo,
                comment_repo,
                Arc::clone(&users),
            ),
            rules: RequestValidator::new(ValidationLimits::STANDARD),
            blobs,
            users,
        }
    }

    /// Registers a user and returns an actor for them.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory rejects the profile.
    pub fn register(&self, name: &str) -> Result<Actor, eyre::Report> {
        let id = UserId::new();
        let email = format!("{}@example.com", name.to_ascii_lowercase());
        self.users.insert(UserProfile::new(id, name, email))?;
        Ok(Actor::new(id))
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides a freshly wired tracker for each test.
#[fixture]
pub fn tracker() -> Tracker {
    init_tracing();
    Tracker::new()
}

/// Installs a test log writer once per process.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}
