//! Comment record and edit history.

use super::{CommentDomainError, CommentId};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One superseded version of a comment body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    /// Content before the edit.
    pub previous_content: String,
    /// When the edit happened.
    pub edited_at: DateTime<Utc>,
    /// Who made the edit.
    pub edited_by: UserId,
}

/// A comment on a task, optionally replying to another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    content: String,
    task_id: TaskId,
    author_id: UserId,
    parent_id: Option<CommentId>,
    mentioned_users: Option<BTreeSet<UserId>>,
    edit_history: Vec<EditRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Fields supplied when posting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Comment body.
    pub content: String,
    /// Task being discussed.
    pub task_id: TaskId,
    /// Comment being replied to.
    pub parent_id: Option<CommentId>,
    /// Users mentioned in the body.
    pub mentioned_users: Option<BTreeSet<UserId>>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted identifier.
    pub id: CommentId,
    /// Persisted body.
    pub content: String,
    /// Persisted task.
    pub task_id: TaskId,
    /// Persisted author.
    pub author_id: UserId,
    /// Persisted parent.
    pub parent_id: Option<CommentId>,
    /// Persisted mentions.
    pub mentioned_users: Option<BTreeSet<UserId>>,
    /// Persisted edit history, oldest first.
    pub edit_history: Vec<EditRecord>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment authored by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyContent`] for a blank body.
    pub fn new(
        new_comment: NewComment,
        author_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, CommentDomainError> {
        ensure_content(&new_comment.content)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: CommentId::new(),
            content: new_comment.content,
            task_id: new_comment.task_id,
            author_id,
            parent_id: new_comment.parent_id,
            mentioned_users: new_comment.mentioned_users,
            edit_history: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            content: data.content,
            task_id: data.task_id,
            author_id: data.author_id,
            parent_id: data.parent_id,
            mentioned_users: data.mentioned_users,
            edit_history: data.edit_history,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the current body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the task being discussed.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the parent comment for replies.
    #[must_use]
    pub const fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }

    /// Returns whether this comment starts a thread.
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns mentioned users.
    #[must_use]
    pub const fn mentioned_users(&self) -> Option<&BTreeSet<UserId>> {
        self.mentioned_users.as_ref()
    }

    /// Returns prior versions of the body, oldest first.
    #[must_use]
    pub fn edit_history(&self) -> &[EditRecord] {
        &self.edit_history
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

    /// Replaces the body and mentions, archiving the old body.
    ///
    /// Exactly one [`EditRecord`] is appended per call, even when the new
    /// content equals the old. Mentions are replaced wholesale, so passing
    /// `None` clears them.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyContent`] for a blank body; the
    /// comment is left unchanged.
    pub fn edit(
        &mut self,
        content: String,
        mentioned_users: Option<BTreeSet<UserId>>,
        editor: UserId,
        clock: &impl Clock,
    ) -> Result<(), CommentDomainError> {
        ensure_content(&content)?;
        let now = clock.utc();
        let previous_content = std::mem::replace(&mut self.content, content);
        self.edit_history.push(EditRecord {
            previous_content,
            edited_at: now,
            edited_by: editor,
        });
        self.mentioned_users = mentioned_users;
        self.updated_at = now;
        Ok(())
    }
}

fn ensure_content(content: &str) -> Result<(), CommentDomainError> {
    if content.trim().is_empty() {
        return Err(CommentDomainError::EmptyContent);
    }
    Ok(())
}
