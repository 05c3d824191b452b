//! Blob store backed by a capability-scoped local directory.

use async_trait::async_trait;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::bounty::ports::{BlobPath, BlobRef, BlobStore, BlobStoreError, BlobStoreResult};

/// Blob store writing uploads beneath a single root directory.
///
/// All file access goes through a [`Dir`] handle, so no reference can reach
/// outside the root. Resolved URLs are `<public base URL>/<path>`.
#[derive(Debug, Clone)]
pub struct FilesystemBlobStore {
    root: Arc<Dir>,
    public_base_url: String,
}

impl FilesystemBlobStore {
    /// Opens `root` and serves blobs under `public_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] when the directory cannot be
    /// opened.
    pub fn open(root: &Utf8Path, public_base_url: impl Into<String>) -> BlobStoreResult<Self> {
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(BlobStoreError::storage)?;
        Ok(Self::from_dir(dir, public_base_url))
    }

    /// Wraps an already opened directory handle.
    #[must_use]
    pub fn from_dir(root: Dir, public_base_url: impl Into<String>) -> Self {
        let base: String = public_base_url.into();
        Self {
            root: Arc::new(root),
            public_base_url: base.trim_end_matches('/').to_owned(),
        }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BlobStoreResult<T>
    where
        F: FnOnce(&Dir) -> BlobStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || f(&root))
            .await
            .map_err(BlobStoreError::storage)?
    }
}

/// Accepts only relative paths made of plain segments.
fn checked_relative_path(raw: &str) -> BlobStoreResult<Utf8PathBuf> {
    let path = Utf8Path::new(raw);
    let is_plain = !raw.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Utf8Component::Normal(_)));
    if !is_plain {
        return Err(BlobStoreError::InvalidPath(raw.to_owned()));
    }
    Ok(path.to_path_buf())
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn upload(&self, path: &BlobPath, bytes: Vec<u8>) -> BlobStoreResult<BlobRef> {
        let relative = checked_relative_path(path.as_str())?;
        let reference = BlobRef::new(relative.as_str());
        self.run_blocking(move |root| {
            if let Some(parent) = relative.parent().filter(|parent| !parent.as_str().is_empty()) {
                root.create_dir_all(parent).map_err(BlobStoreError::storage)?;
            }
            root.write(&relative, bytes).map_err(BlobStoreError::storage)
        })
        .await?;
        Ok(reference)
    }

    async fn delete(&self, reference: &BlobRef) -> BlobStoreResult<()> {
        let relative = checked_relative_path(reference.as_str())?;
        self.run_blocking(move |root| match root.remove_file(&relative) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(BlobStoreError::storage(err)),
        })
        .await
    }

    async fn resolve(&self, reference: &BlobRef) -> BlobStoreResult<String> {
        let relative = checked_relative_path(reference.as_str())?;
        let lookup = reference.clone();
        self.run_blocking(move |root| match root.metadata(&relative) {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(BlobStoreError::NotFound(lookup)),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(BlobStoreError::NotFound(lookup)),
            Err(err) => Err(BlobStoreError::storage(err)),
        })
        .await?;
        Ok(format!("{}/{}", self.public_base_url, reference))
    }
}
