//! Port contracts for the external collaborators of the bounty core.
//!
//! Ports define infrastructure-agnostic interfaces used by bounty services:
//! a document store for tasks, a blob store for images, and an identity
//! provider for sign-in sessions.

pub mod blob_store;
pub mod identity;
pub mod repository;

pub use blob_store::{
    BlobPath, BlobRef, BlobStore, BlobStoreError, BlobStoreResult, BlobUpload,
    PROOF_IMAGE_PREFIX, TASK_IMAGE_PREFIX,
};
pub use identity::{IdentityError, IdentityProvider, IdentityResult};
pub use repository::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
