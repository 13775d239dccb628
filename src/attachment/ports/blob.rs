//! Blob storage port for attachment bytes.

use async_trait::async_trait;
use camino::Utf8Path;
use std::sync::Arc;
use thiserror::Error;

/// Result type for blob store operations.
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

/// Byte storage addressed by relative UTF-8 paths.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `bytes` at `path`, replacing any existing blob.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] when the write fails.
    async fn put(&self, path: &Utf8Path, bytes: &[u8]) -> BlobStoreResult<()>;

    /// Reads the blob at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::NotFound`] when nothing is stored there.
    async fn get(&self, path: &Utf8Path) -> BlobStoreResult<Vec<u8>>;

    /// Removes the blob at `path`, returning whether anything was removed.
    ///
    /// A missing blob is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] when the removal fails.
    async fn delete(&self, path: &Utf8Path) -> BlobStoreResult<bool>;
}

/// Errors returned by blob store implementations.
#[derive(Debug, Clone, Error)]
pub enum BlobStoreError {
    /// No blob exists at the path.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// Underlying storage failure.
    #[error("blob storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl BlobStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
