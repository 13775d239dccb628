//! Validation error types.

use crate::comment::ports::CommentRepositoryError;
use crate::identity::ports::UserDirectoryError;
use crate::project::ports::ProjectRepositoryError;
use crate::task::ports::TaskRepositoryError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending input field.
    pub field: &'static str,
    /// Human-readable explanation.
    pub message: String,
}

/// Every rule a request violated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    errors: Vec<FieldError>,
}

impl ValidationFailure {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Returns the recorded violations.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns whether `field` has at least one violation.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// Returns whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Merges violations from `other`.
    pub fn extend(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    /// Converts the collector into a result.
    ///
    /// # Errors
    ///
    /// Returns `self` when any violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed")?;
        for (index, error) in self.errors.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{separator}{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Errors from reference checks.
#[derive(Debug, Error)]
pub enum ReferenceCheckError {
    /// One or more referenced records do not exist.
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
    /// Project lookup failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// Comment lookup failed.
    #[error(transparent)]
    Comment(#[from] CommentRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}
