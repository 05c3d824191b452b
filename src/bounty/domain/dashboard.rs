//! Per-user dashboard projection.

use super::{BountyTask, TaskStatus, UserId};

/// Headline figures for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// Sum of bounties of validated tasks the user did.
    pub total_earned: u64,
    /// Number of validated tasks the user did.
    pub tasks_completed: usize,
    /// Number of tasks the user posted.
    pub tasks_posted: usize,
    /// Number of tasks the user validated.
    pub tasks_validated: usize,
}

/// Tasks and statistics relevant to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDashboard {
    user_id: UserId,
    stats: DashboardStats,
    posted: Vec<BountyTask>,
    in_progress: Vec<BountyTask>,
    completed: Vec<BountyTask>,
}

impl UserDashboard {
    /// Builds the dashboard for `user_id` from the tasks they posted, claimed
    /// and validated.
    ///
    /// The three inputs mirror the three participant lookups a document
    /// store answers; tasks outside the relevant role are ignored.
    #[must_use]
    pub fn build(
        user_id: UserId,
        posted: Vec<BountyTask>,
        claimed: Vec<BountyTask>,
        validated: &[BountyTask],
    ) -> Self {
        let posted: Vec<BountyTask> = posted
            .into_iter()
            .filter(|task| task.is_posted_by(&user_id))
            .collect();
        let (completed, in_progress): (Vec<BountyTask>, Vec<BountyTask>) = claimed
            .into_iter()
            .filter(|task| task.is_claimed_by(&user_id))
            .filter(|task| {
                matches!(
                    task.status(),
                    TaskStatus::Claimed | TaskStatus::Completed | TaskStatus::Validated
                )
            })
            .partition(|task| task.status() == TaskStatus::Validated);
        let tasks_validated = validated
            .iter()
            .filter(|task| task.validator() == Some(&user_id))
            .count();

        let stats = DashboardStats {
            total_earned: completed
                .iter()
                .fold(0_u64, |sum, task| sum.saturating_add(task.bounty())),
            tasks_completed: completed.len(),
            tasks_posted: posted.len(),
            tasks_validated,
        };

        Self {
            user_id,
            stats,
            posted,
            in_progress,
            completed,
        }
    }

    /// Returns the user this dashboard belongs to.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the headline figures.
    #[must_use]
    pub const fn stats(&self) -> DashboardStats {
        self.stats
    }

    /// Returns the tasks the user posted.
    #[must_use]
    pub fn posted(&self) -> &[BountyTask] {
        &self.posted
    }

    /// Returns claimed or completed tasks awaiting validation.
    #[must_use]
    pub fn in_progress(&self) -> &[BountyTask] {
        &self.in_progress
    }

    /// Returns validated tasks the user did.
    #[must_use]
    pub fn completed(&self) -> &[BountyTask] {
        &self.completed
    }
}
