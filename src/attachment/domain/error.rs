//! Error types for attachment domain validation.

use thiserror::Error;

/// Errors returned while constructing attachment records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachmentDomainError {
    /// The original filename is blank.
    #[error("attachment filename must not be empty")]
    EmptyFilename,

    /// Version numbers start at one.
    #[error("attachment version must be at least 1")]
    ZeroVersion,

    /// The next version number does not fit.
    #[error("attachment version overflowed")]
    VersionOverflow,

    /// The file size cannot be represented.
    #[error("attachment is too large to record")]
    FileTooLarge,
}

/// Error returned when parsing an unknown attachment status string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown attachment status: {0}")]
pub struct ParseAttachmentStatusError(pub String);
