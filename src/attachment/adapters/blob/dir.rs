//! Blob store rooted in a capability-scoped directory.
//!
//! All paths are resolved relative to the root directory handle, so a blob
//! path can never reach outside it.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::attachment::ports::{BlobStore, BlobStoreError, BlobStoreResult};
use crate::blocking::run_blocking_with;

/// Blob store writing files beneath a root directory.
#[derive(Debug, Clone)]
pub struct DirBlobStore {
    root: Arc<Dir>,
}

impl DirBlobStore {
    /// Opens `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] when the directory cannot be
    /// created or opened.
    pub fn open(root: &Utf8Path) -> BlobStoreResult<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(BlobStoreError::storage)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(BlobStoreError::storage)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory handle.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self {
            root: Arc::new(dir),
        }
    }

    async fn run_blocking<F, T>(&self, path: &Utf8Path, f: F) -> BlobStoreResult<T>
    where
        F: FnOnce(&Dir, &Utf8Path) -> BlobStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        let owned: Utf8PathBuf = path.to_owned();
        run_blocking_with(move || f(&root, &owned), BlobStoreError::storage).await
    }
}

#[async_trait]
impl BlobStore for DirBlobStore {
    async fn put(&self, path: &Utf8Path, bytes: &[u8]) -> BlobStoreResult<()> {
        let contents = bytes.to_vec();
        self.run_blocking(path, move |root, target| {
            if let Some(parent) = target.parent().filter(|parent| !parent.as_str().is_empty()) {
                root.create_dir_all(parent)
                    .map_err(BlobStoreError::storage)?;
            }
            root.write(target, contents)
                .map_err(BlobStoreError::storage)
        })
        .await
    }

    async fn get(&self, path: &Utf8Path) -> BlobStoreResult<Vec<u8>> {
        self.run_blocking(path, |root, target| {
            root.read(target).map_err(|err| match err.kind() {
                ErrorKind::NotFound => BlobStoreError::NotFound(target.as_str().to_owned()),
                _ => BlobStoreError::storage(err),
            })
        })
        .await
    }

    async fn delete(&self, path: &Utf8Path) -> BlobStoreResult<bool> {
        self.run_blocking(path, |root, target| match root.remove_file(target) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(BlobStoreError::storage(err)),
        })
        .await
    }
}
