//! In-memory blob store.

use async_trait::async_trait;
use camino::Utf8Path;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::attachment::ports::{BlobStore, BlobStoreError, BlobStoreResult};

/// Thread-safe blob store keeping bytes in a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a blob is stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] if the lock is poisoned.
    pub fn contains(&self, path: &Utf8Path) -> BlobStoreResult<bool> {
        let blobs = self.blobs.read().map_err(lock_error)?;
        Ok(blobs.contains_key(path.as_str()))
    }

    /// Returns the number of stored blobs.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] if the lock is poisoned.
    pub fn len(&self) -> BlobStoreResult<usize> {
        let blobs = self.blobs.read().map_err(lock_error)?;
        Ok(blobs.len())
    }

    /// Returns whether the store holds no blobs.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] if the lock is poisoned.
    pub fn is_empty(&self) -> BlobStoreResult<bool> {
        self.len().map(|count| count == 0)
    }
}

fn lock_error(err: impl std::fmt::Display) -> BlobStoreError {
    BlobStoreError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, path: &Utf8Path, bytes: &[u8]) -> BlobStoreResult<()> {
        let mut blobs = self.blobs.write().map_err(lock_error)?;
        blobs.insert(path.as_str().to_owned(), bytes.to_vec());
        Ok(())
    }

    async fn get(&self, path: &Utf8Path) -> BlobStoreResult<Vec<u8>> {
        let blobs = self.blobs.read().map_err(lock_error)?;
        blobs
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| BlobStoreError::NotFound(path.as_str().to_owned()))
    }

    async fn delete(&self, path: &Utf8Path) -> BlobStoreResult<bool> {
        let mut blobs = self.blobs.write().map_err(lock_error)?;
        Ok(blobs.remove(path.as_str()).is_some())
    }
}
