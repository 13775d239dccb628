//! Existence checks for records referenced by requests.

use super::{ReferenceCheckError, ValidationFailure};
use crate::attachment::services::UploadRequest;
use crate::comment::{ports::CommentRepository, services::CreateCommentRequest};
use crate::identity::ports::UserDirectory;
use crate::project::ports::ProjectRepository;
use crate::task::{ports::TaskRepository, services::CreateTaskRequest};
use std::sync::Arc;

/// Checks that referenced projects, tasks, comments and users exist.
///
/// Dependency edges are not checked here; prerequisites may name tasks that
/// no longer exist.
#[derive(Clone)]
pub struct ReferenceValidator<P, T, Cm, U>
where
    P: ProjectRepository,
    T: TaskRepository,
    Cm: CommentRepository,
    U: UserDirectory,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    comments: Arc<Cm>,
    users: Arc<U>,
}

impl<P, T, Cm, U> ReferenceValidator<P, T, Cm, U>
where
    P: ProjectRepository,
    T: TaskRepository,
    Cm: CommentRepository,
    U: UserDirectory,
{
    /// Creates a validator over the given stores.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>, comments: Arc<Cm>, users: Arc<U>) -> Self {
        Self {
            projects,
            tasks,
            comments,
            users,
        }
    }

    /// Checks that the target project exists.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceCheckError::Invalid`] when it does not.
    pub async fn task_request(&self, request: &CreateTaskRequest) -> Result<(), ReferenceCheckError> {
        let mut failure = ValidationFailure::new();
        if self
            .projects
            .find_by_id(request.project_id())
            .await?
            .is_none()
        {
            failure.push("project_id", "does not exist");
        }
        failure.into_result().map_err(ReferenceCheckError::from)
    }

    /// Checks the task, parent comment and mentioned users of a comment.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceCheckError::Invalid`] listing every missing record.
    pub async fn comment_request(
        &self,
        request: &CreateCommentRequest,
    ) -> Result<(), ReferenceCheckError> {
        let mut failure = ValidationFailure::new();
        if self.tasks.find_by_id(request.task_id()).await?.is_none() {
            failure.push("task_id", "does not exist");
        }
        if let Some(parent_id) = request.parent_id() {
            if self.comments.find_by_id(parent_id).await?.is_none() {
                failure.push("parent_id", "does not exist");
            }
        }
        for user_id in request.mentioned_users().into_iter().flatten() {
            if !self.users.exists(*user_id).await? {
                failure.push("mentioned_users", format!("unknown user {user_id}"));
            }
        }
        failure.into_result().map_err(ReferenceCheckError::from)
    }

    /// Checks that the target task of an upload exists.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceCheckError::Invalid`] when it does not.
    pub async fn upload(&self, request: &UploadRequest) -> Result<(), ReferenceCheckError> {
        let mut failure = ValidationFailure::new();
        if self.tasks.find_by_id(request.task_id()).await?.is_none() {
            failure.push("task_id", "does not exist");
        }
        failure.into_result().map_err(ReferenceCheckError::from)
    }
}
