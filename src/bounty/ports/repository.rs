//! Repository port for bounty task persistence and lookup.

use crate::bounty::domain::{BountyTask, TaskCategory, TaskId, TaskStatus, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Single-field equality filter, the only query shape the document store
/// offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Tasks posted by the user.
    PostedBy(UserId),
    /// Tasks claimed by the user as doer.
    ClaimedBy(UserId),
    /// Tasks validated by the user.
    ValidatedBy(UserId),
    /// Tasks in the given status.
    Status(TaskStatus),
    /// Tasks in the given category.
    Category(TaskCategory),
}

impl TaskFilter {
    /// Returns whether `task` satisfies this filter.
    #[must_use]
    pub fn matches(&self, task: &BountyTask) -> bool {
        match self {
            Self::PostedBy(user) => task.is_posted_by(user),
            Self::ClaimedBy(user) => task.is_claimed_by(user),
            Self::ValidatedBy(user) => task.validator() == Some(user),
            Self::Status(status) => task.status() == *status,
            Self::Category(category) => task.category() == *category,
        }
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &BountyTask) -> TaskRepositoryResult<()>;

    /// Replaces a stored task if its stored revision still equals
    /// `expected_revision`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// and [`TaskRepositoryError::ConcurrentModification`] when another write
    /// landed first.
    async fn update(&self, task: &BountyTask, expected_revision: u64)
    -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<BountyTask>>;

    /// Returns every task, newest first.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<BountyTask>>;

    /// Returns the tasks matching `filter`, newest first.
    async fn find_where(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<BountyTask>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored revision moved on since the task was read.
    #[error("task {task_id} was modified concurrently (expected revision {expected}, found {actual})")]
    ConcurrentModification {
        /// Task whose write was rejected.
        task_id: TaskId,
        /// Revision the writer read.
        expected: u64,
        /// Revision currently stored.
        actual: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
