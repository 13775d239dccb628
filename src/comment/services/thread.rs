//! Service layer for posting, editing and reading comment threads.

use crate::comment::{
    domain::{Comment, CommentDomainError, CommentId, NewComment},
    ports::{CommentRepository, CommentRepositoryError},
};
use crate::identity::{
    domain::{Actor, UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::task::domain::TaskId;
use mockable::Clock;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for posting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    content: String,
    task_id: TaskId,
    parent_id: Option<CommentId>,
    mentioned_users: Option<BTreeSet<UserId>>,
}

impl CreateCommentRequest {
    /// Creates a top-level comment request.
    #[must_use]
    pub fn new(content: impl Into<String>, task_id: TaskId) -> Self {
        Self {
            content: content.into(),
            task_id,
            parent_id: None,
            mentioned_users: None,
        }
    }

    /// Makes the comment a reply to `parent_id`.
    #[must_use]
    pub const fn in_reply_to(mut self, parent_id: CommentId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the mentioned users.
    #[must_use]
    pub fn with_mentions(mut self, users: impl IntoIterator<Item = UserId>) -> Self {
        self.mentioned_users = Some(users.into_iter().collect());
        self
    }

    /// Returns the body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the task being discussed.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the parent comment, if this is a reply.
    #[must_use]
    pub const fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }

    /// Returns the mentioned users.
    #[must_use]
    pub const fn mentioned_users(&self) -> Option<&BTreeSet<UserId>> {
        self.mentioned_users.as_ref()
    }
}

/// A reply with its author's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadReply {
    /// The reply.
    pub comment: Comment,
    /// The author's profile, when known.
    pub author: Option<UserProfile>,
}

/// A comment with its author and direct replies, oldest reply first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    /// The comment.
    pub comment: Comment,
    /// The author's profile, when known.
    pub author: Option<UserProfile>,
    /// Direct replies.
    pub replies: Vec<ThreadReply>,
}

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CommentDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),
    /// User directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// The comment does not exist.
    #[error("comment not found: {0}")]
    NotFound(CommentId),
}

/// Result type for comment service operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;

/// Comment thread orchestration service.
#[derive(Clone)]
pub struct CommentThreadService<Cm, U, C>
where
    Cm: CommentRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    comments: Arc<Cm>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<Cm, U, C> CommentThreadService<Cm, U, C>
where
    Cm: CommentRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new comment thread service.
    #[must_use]
    pub const fn new(comments: Arc<Cm>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            comments,
            users,
            clock,
        }
    }

    /// Posts a comment authored by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Domain`] for a blank body and
    /// [`CommentServiceError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateCommentRequest,
    ) -> CommentServiceResult<Comment> {
        let comment = Comment::new(
            NewComment {
                content: request.content,
                task_id: request.task_id,
                parent_id: request.parent_id,
                mentioned_users: request.mentioned_users,
            },
            actor.user_id(),
            &*self.clock,
        )?;
        self.comments.store(&comment).await?;
        info!(
            comment_id = %comment.id(),
            task_id = %comment.task_id(),
            reply = !comment.is_top_level(),
            "comment posted"
        );
        Ok(comment)
    }

    /// Replaces a comment's body and mentions, recording the old body in the
    /// edit history under `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::NotFound`] when the comment is absent.
    pub async fn update(
        &self,
        actor: &Actor,
        id: CommentId,
        content: impl Into<String> + Send,
        mentioned_users: Option<BTreeSet<UserId>>,
    ) -> CommentServiceResult<Comment> {
        let mut comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or(CommentServiceError::NotFound(id))?;
        comment.edit(content.into(), mentioned_users, actor.user_id(), &*self.clock)?;
        self.comments.update(&comment).await?;
        debug!(
            comment_id = %id,
            edits = comment.edit_history().len(),
            "comment edited"
        );
        Ok(comment)
    }

    /// Returns a comment with its author and direct replies.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError`] when a lookup fails.
    pub async fn find_by_id(&self, id: CommentId) -> CommentServiceResult<Option<CommentThread>> {
        let Some(comment) = self.comments.find_by_id(id).await? else {
            return Ok(None);
        };
        let mut threads = self.assemble(vec![comment]).await?;
        Ok(threads.pop())
    }

    /// Lists the top-level comments on a task as threads, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError`] when a lookup fails.
    pub async fn list_by_task(&self, task_id: TaskId) -> CommentServiceResult<Vec<CommentThread>> {
        let top_level: Vec<Comment> = self
            .comments
            .list_by_task(task_id)
            .await?
            .into_iter()
            .filter(Comment::is_top_level)
            .collect();
        self.assemble(top_level).await
    }

    /// Permanently removes a comment. Its replies remain addressable.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::NotFound`] when the comment is absent.
    pub async fn delete(&self, id: CommentId) -> CommentServiceResult<()> {
        if self.comments.find_by_id(id).await?.is_none() {
            return Err(CommentServiceError::NotFound(id));
        }
        self.comments.delete(id).await?;
        info!(comment_id = %id, "comment deleted");
        Ok(())
    }

    async fn assemble(&self, roots: Vec<Comment>) -> CommentServiceResult<Vec<CommentThread>> {
        let mut with_replies = Vec::with_capacity(roots.len());
        for root in roots {
            let replies = self.comments.list_replies(root.id()).await?;
            with_replies.push((root, replies));
        }

        let mut author_ids: Vec<UserId> = with_replies
            .iter()
            .flat_map(|(root, replies)| {
                std::iter::once(root.author_id()).chain(replies.iter().map(Comment::author_id))
            })
            .collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors: HashMap<UserId, UserProfile> = self
            .users
            .find_many(&author_ids)
            .await?
            .into_iter()
            .map(|profile| (profile.id, profile))
            .collect();

        Ok(with_replies
            .into_iter()
            .map(|(root, replies)| CommentThread {
                author: authors.get(&root.author_id()).cloned(),
                replies: replies
                    .into_iter()
                    .map(|reply| ThreadReply {
                        author: authors.get(&reply.author_id()).cloned(),
                        comment: reply,
                    })
                    .collect(),
                comment: root,
            })
            .collect())
    }
}
