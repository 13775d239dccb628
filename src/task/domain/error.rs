//! Error types for task domain validation and parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// An hours value is negative, not finite, or too large to track.
    #[error("invalid hours value {0}, expected a finite non-negative number")]
    InvalidHours(f64),

    /// The due date would fall before the start date.
    #[error("due date {due} is before start date {start}")]
    DueBeforeStart {
        /// Effective start date.
        start: NaiveDate,
        /// Effective due date.
        due: NaiveDate,
    },

    /// Logged work must be strictly positive.
    #[error("logged hours must be greater than zero")]
    NonPositiveLoggedHours,

    /// Logging the hours would overflow the tracked total.
    #[error("logged hours overflow the tracked total")]
    HoursOverflow,
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
