//! In-memory blob store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::bounty::ports::{BlobPath, BlobRef, BlobStore, BlobStoreError, BlobStoreResult};

/// URL scheme used for blobs held in memory.
const MEMORY_URL_SCHEME: &str = "memory://";

/// Thread-safe in-memory blob store.
///
/// References are the upload paths; resolved URLs use the `memory://`
/// scheme.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<RwLock<HashMap<BlobRef, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Creates an empty blob store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored bytes for `reference`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] if the lock is poisoned.
    pub fn contents(&self, reference: &BlobRef) -> BlobStoreResult<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|err| BlobStoreError::storage(std::io::Error::other(err.to_string())))?;
        Ok(blobs.get(reference).cloned())
    }

    /// Returns the number of stored blobs.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] if the lock is poisoned.
    pub fn blob_count(&self) -> BlobStoreResult<usize> {
        let blobs = self
            .blobs
            .read()
            .map_err(|err| BlobStoreError::storage(std::io::Error::other(err.to_string())))?;
        Ok(blobs.len())
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, path: &BlobPath, bytes: Vec<u8>) -> BlobStoreResult<BlobRef> {
        let reference = BlobRef::new(path.as_str());
        let mut blobs = self
            .blobs
            .write()
            .map_err(|err| BlobStoreError::storage(std::io::Error::other(err.to_string())))?;
        blobs.insert(reference.clone(), bytes);
        Ok(reference)
    }

    async fn delete(&self, reference: &BlobRef) -> BlobStoreResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|err| BlobStoreError::storage(std::io::Error::other(err.to_string())))?;
        blobs.remove(reference);
        Ok(())
    }

    async fn resolve(&self, reference: &BlobRef) -> BlobStoreResult<String> {
        let blobs = self
            .blobs
            .read()
            .map_err(|err| BlobStoreError::storage(std::io::Error::other(err.to_string())))?;
        if !blobs.contains_key(reference) {
            return Err(BlobStoreError::NotFound(reference.clone()));
        }
        Ok(format!("{MEMORY_URL_SCHEME}{reference}"))
    }
}
