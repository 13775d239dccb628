//! Error types for comment domain validation.

use thiserror::Error;

/// Errors returned while constructing or editing comments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The comment body is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyContent,
}
