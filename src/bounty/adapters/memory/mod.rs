//! In-process adapters used by tests and single-node deployments.

mod blob;
mod identity;
mod task;

pub use blob::InMemoryBlobStore;
pub use identity::StaticIdentityProvider;
pub use task::InMemoryTaskRepository;
