//! Versioned file attachments on tasks.
//!
//! Attachment records carry metadata only. File bytes live in a
//! [`ports::BlobStore`] under `attachments/tasks/<task_id>/<stored name>`.
//! Re-uploading a file with the same original name to the same task creates
//! a new record with the next version number. Versions are never reused,
//! even after the record holding them is soft-deleted.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
