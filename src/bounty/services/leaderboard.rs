//! Read-side service projecting the leaderboard from stored tasks.

use crate::bounty::{
    domain::{Leaderboard, LeaderboardSort},
    ports::{TaskRepository, TaskRepositoryResult},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds leaderboards from a full scan of the task repository.
#[derive(Clone)]
pub struct LeaderboardService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> LeaderboardService<R>
where
    R: TaskRepository,
{
    /// Creates a new leaderboard service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Aggregates every task into a leaderboard ranked by `sort`.
    ///
    /// The result is a snapshot; writes landing during the scan may or may
    /// not be reflected.
    ///
    /// # Errors
    ///
    /// Returns [`crate::bounty::ports::TaskRepositoryError`] when the scan
    /// fails.
    pub async fn leaderboard(&self, sort: LeaderboardSort) -> TaskRepositoryResult<Leaderboard> {
        let tasks = self.repository.list_all().await.inspect_err(|err| {
            warn!(error = %err, "leaderboard scan failed");
        })?;
        let leaderboard = Leaderboard::build(&tasks, sort);
        debug!(
            sort = %sort,
            tasks = tasks.len(),
            contributors = leaderboard.len(),
            "leaderboard built"
        );
        Ok(leaderboard)
    }
}
