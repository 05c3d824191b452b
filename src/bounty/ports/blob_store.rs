//! Blob storage port for task and proof images.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for blob store operations.
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

/// Folder for images attached to newly posted tasks.
pub const TASK_IMAGE_PREFIX: &str = "task-images";

/// Folder for images attached to proof submissions.
pub const PROOF_IMAGE_PREFIX: &str = "proof-images";

/// Relative storage path of a blob,
/// `<prefix>/<unix-millis>-<upload id>-<file name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobPath(String);

impl BlobPath {
    /// Builds a timestamped path for an uploaded file.
    ///
    /// Any directory components in `file_name` are stripped so uploads always
    /// land directly under `prefix`. Each call draws a fresh upload id, so
    /// same-named files uploaded in the same millisecond never share a path.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::InvalidPath`] when the file name is empty
    /// once directory components are removed.
    pub fn for_upload(
        prefix: &str,
        file_name: &str,
        uploaded_at: DateTime<Utc>,
    ) -> BlobStoreResult<Self> {
        let base_name = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();
        if base_name.is_empty() || base_name == "." || base_name == ".." {
            return Err(BlobStoreError::InvalidPath(file_name.to_owned()));
        }
        Ok(Self(format!(
            "{prefix}/{}-{}-{base_name}",
            uploaded_at.timestamp_millis(),
            Uuid::new_v4().simple()
        )))
    }

    /// Returns the path as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference returned by an upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(String);

impl BlobRef {
    /// Wraps a store-specific reference.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the reference as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file supplied by a user for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobUpload {
    /// Original file name.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl BlobUpload {
    /// Creates an upload payload.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Binary object storage contract.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` at `path`, returning a reference to the blob.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError`] when the path is rejected or the write
    /// fails.
    async fn upload(&self, path: &BlobPath, bytes: Vec<u8>) -> BlobStoreResult<BlobRef>;

    /// Removes a stored blob. Removing an unknown reference succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError`] when the reference is rejected or the
    /// removal fails.
    async fn delete(&self, reference: &BlobRef) -> BlobStoreResult<()>;

    /// Resolves a reference to a fetchable URL.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::NotFound`] for unknown references.
    async fn resolve(&self, reference: &BlobRef) -> BlobStoreResult<String>;
}

/// Errors returned by blob store implementations.
#[derive(Debug, Clone, Error)]
pub enum BlobStoreError {
    /// The path is empty or escapes the storage root.
    #[error("invalid blob path: {0}")]
    InvalidPath(String),

    /// No blob exists for the reference.
    #[error("blob not found: {0}")]
    NotFound(BlobRef),

    /// Storage-layer failure.
    #[error("blob storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl BlobStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
