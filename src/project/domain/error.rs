//! Error types for project domain validation and parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing domain project values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// The end date would fall before the start date.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Effective start date.
        start: NaiveDate,
        /// Effective end date.
        end: NaiveDate,
    },
}

/// Error returned while parsing project statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);
