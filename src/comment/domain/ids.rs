//! Identifier types for the comment domain.

use crate::ids::uuid_id;

uuid_id!(
    /// Unique identifier for a comment.
    CommentId
);
