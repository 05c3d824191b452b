//! Shared fixtures for in-memory integration tests.

use bountyboard::bounty::{
    adapters::memory::{InMemoryBlobStore, InMemoryTaskRepository},
    domain::{BountyDomainError, BountyTask, Points, TaskDraft, TaskLimits, UserId, UserProfile},
    services::{BountyLifecycleService, LeaderboardService},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Lifecycle service wired to in-memory adapters.
pub type MemoryLifecycleService =
    BountyLifecycleService<InMemoryTaskRepository, InMemoryBlobStore, DefaultClock>;

/// Services sharing one in-memory repository.
pub struct Board {
    /// Shared repository.
    pub repository: Arc<InMemoryTaskRepository>,
    /// Shared blob store.
    pub blobs: Arc<InMemoryBlobStore>,
    /// Lifecycle service.
    pub lifecycle: MemoryLifecycleService,
    /// Leaderboard service.
    pub leaderboard: LeaderboardService<InMemoryTaskRepository>,
}

/// Provides services over a fresh, empty board.
#[fixture]
pub fn board() -> Board {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let blobs = Arc::new(InMemoryBlobStore::new());
    Board {
        lifecycle: BountyLifecycleService::new(
            Arc::clone(&repository),
            Arc::clone(&blobs),
            Arc::new(DefaultClock),
        ),
        leaderboard: LeaderboardService::new(Arc::clone(&repository)),
        repository,
        blobs,
    }
}

/// Builds a user profile snapshot.
///
/// # Errors
///
/// Returns an error if `id` is blank.
pub fn user(id: &str, name: &str) -> Result<UserProfile, BountyDomainError> {
    Ok(UserProfile::new(UserId::new(id)?, name))
}

/// Builds an open task without going through a service.
///
/// # Errors
///
/// Returns an error if `bounty` is zero.
pub fn draft_task(poster: &UserProfile, bounty: u64) -> Result<BountyTask, BountyDomainError> {
    let draft = TaskDraft::new(
        "Sort donated books",
        "Shelve by genre",
        Points::new(bounty)?,
        &TaskLimits::default(),
    )?;
    Ok(BountyTask::post(poster.clone(), draft, &DefaultClock))
}
