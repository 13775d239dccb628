//! Domain model for comment threads.

mod comment;
mod error;
mod ids;

pub use comment::{Comment, EditRecord, NewComment, PersistedCommentData};
pub use error::CommentDomainError;
pub use ids::CommentId;
