//! Port contracts for attachment metadata and blob storage.

pub mod blob;
pub mod repository;

pub use blob::{BlobStore, BlobStoreError, BlobStoreResult};
pub use repository::{
    AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult,
};
