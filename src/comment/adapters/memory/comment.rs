//! In-memory repository for comments.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::comment::{
    domain::{Comment, CommentId},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<Vec<Comment>>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn oldest_first(
        &self,
        predicate: impl Fn(&Comment) -> bool,
    ) -> CommentRepositoryResult<Vec<Comment>> {
        let comments = self.comments.read().map_err(lock_error)?;
        let mut listed: Vec<Comment> = comments
            .iter()
            .filter(|comment| predicate(comment))
            .cloned()
            .collect();
        listed.sort_by_key(Comment::created_at);
        Ok(listed)
    }
}

fn lock_error(err: impl std::fmt::Display) -> CommentRepositoryError {
    CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut comments = self.comments.write().map_err(lock_error)?;
        if comments.iter().any(|existing| existing.id() == comment.id()) {
            return Err(CommentRepositoryError::DuplicateComment(comment.id()));
        }
        comments.push(comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut comments = self.comments.write().map_err(lock_error)?;
        let slot = comments
            .iter_mut()
            .find(|existing| existing.id() == comment.id())
            .ok_or(CommentRepositoryError::NotFound(comment.id()))?;
        *slot = comment.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        let comments = self.comments.read().map_err(lock_error)?;
        Ok(comments.iter().find(|comment| comment.id() == id).cloned())
    }

    async fn list_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        self.oldest_first(|comment| comment.task_id() == task_id)
    }

    async fn list_replies(&self, parent_id: CommentId) -> CommentRepositoryResult<Vec<Comment>> {
        self.oldest_first(|comment| comment.parent_id() == Some(parent_id))
    }

    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<()> {
        let mut comments = self.comments.write().map_err(lock_error)?;
        let position = comments
            .iter()
            .position(|comment| comment.id() == id)
            .ok_or(CommentRepositoryError::NotFound(id))?;
        comments.remove(position);
        Ok(())
    }
}
