//! Contribution aggregation and leaderboard ranking.
//!
//! The leaderboard is a read-side projection: it is rebuilt from the full
//! task set on every request and has no persisted state of its own. Names
//! and avatars come from the snapshots stored on tasks and pledges, so they
//! reflect each user's identity at the time they acted.

use super::{
    ANONYMOUS_DISPLAY_NAME, BountyTask, ParseLeaderboardSortError, TaskStatus, UserId,
    UserProfile,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Key the leaderboard is ranked by, always descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    /// Points earned plus points stacked.
    #[default]
    Total,
    /// Points earned from validated tasks.
    Earned,
    /// Points pledged onto other tasks.
    Stacked,
}

impl LeaderboardSort {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Earned => "earned",
            Self::Stacked => "stacked",
        }
    }

    const fn key(self, stats: &ContributorStats) -> u64 {
        match self {
            Self::Total => stats.total_contribution(),
            Self::Earned => stats.points_earned,
            Self::Stacked => stats.points_stacked,
        }
    }
}

impl fmt::Display for LeaderboardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LeaderboardSort {
    type Error = ParseLeaderboardSortError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "total" => Ok(Self::Total),
            "earned" => Ok(Self::Earned),
            "stacked" => Ok(Self::Stacked),
            _ => Err(ParseLeaderboardSortError(value.to_owned())),
        }
    }
}

/// Aggregated statistics for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStats {
    /// User the statistics belong to.
    pub user_id: UserId,
    /// Display name from the first snapshot seen while scanning.
    pub display_name: String,
    /// Avatar URL from the first snapshot seen while scanning.
    pub avatar_url: Option<String>,
    /// Sum of bounties of validated tasks the user did.
    pub points_earned: u64,
    /// Number of validated tasks the user did.
    pub tasks_completed: u64,
    /// Number of tasks the user posted.
    pub tasks_posted: u64,
    /// Sum of the user's pledges.
    pub points_stacked: u64,
    /// Number of pledges the user made.
    pub tasks_stacked: u64,
    /// Number of tasks the user validated.
    pub tasks_validated: u64,
}

impl ContributorStats {
    fn empty(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.id().clone(),
            display_name: profile.display_name().to_owned(),
            avatar_url: profile.avatar_url().map(str::to_owned),
            points_earned: 0,
            tasks_completed: 0,
            tasks_posted: 0,
            points_stacked: 0,
            tasks_stacked: 0,
            tasks_validated: 0,
        }
    }

    /// Points earned plus points stacked.
    #[must_use]
    pub const fn total_contribution(&self) -> u64 {
        self.points_earned.saturating_add(self.points_stacked)
    }
}

/// Ranked list of contributor statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    sort: LeaderboardSort,
    entries: Vec<ContributorStats>,
}

impl Leaderboard {
    /// Aggregates `tasks` and ranks users by `sort`.
    ///
    /// Users appear in the order they are first seen while scanning; the
    /// stable sort keeps that order among ties.
    #[must_use]
    pub fn build<'a>(tasks: impl IntoIterator<Item = &'a BountyTask>, sort: LeaderboardSort) -> Self {
        let mut ledger = Ledger::default();

        for task in tasks {
            let poster = ledger.entry(task.poster());
            poster.tasks_posted += 1;

            if let Some(doer) = task.doer() {
                let doer_stats = ledger.entry(doer);
                if task.status() == TaskStatus::Validated {
                    doer_stats.points_earned = doer_stats.points_earned.saturating_add(task.bounty());
                    doer_stats.tasks_completed += 1;
                }
            }

            if let Some(validator) = task.validator() {
                ledger.entry_by_id(validator, task.poster()).tasks_validated += 1;
            }

            for pledge in task.pledges() {
                let contributor = ledger.entry(pledge.contributor());
                contributor.points_stacked = contributor
                    .points_stacked
                    .saturating_add(pledge.amount().value());
                contributor.tasks_stacked += 1;
            }
        }

        let mut entries = ledger.into_entries();
        entries.sort_by(|a, b| sort.key(b).cmp(&sort.key(a)));
        Self { sort, entries }
    }

    /// Returns the key this leaderboard is ranked by.
    #[must_use]
    pub const fn sort(&self) -> LeaderboardSort {
        self.sort
    }

    /// Returns the ranked entries, best first.
    #[must_use]
    pub fn entries(&self) -> &[ContributorStats] {
        &self.entries
    }

    /// Iterates over `(rank, stats)` pairs with 1-based ranks.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &ContributorStats)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, stats)| (index + 1, stats))
    }

    /// Returns the 1-based rank of `user`, if they appear.
    #[must_use]
    pub fn rank_of(&self, user: &UserId) -> Option<usize> {
        self.entries
            .iter()
            .position(|stats| &stats.user_id == user)
            .map(|index| index + 1)
    }

    /// Returns the statistics for `user`, if they appear.
    #[must_use]
    pub fn stats_for(&self, user: &UserId) -> Option<&ContributorStats> {
        self.entries.iter().find(|stats| &stats.user_id == user)
    }

    /// Returns the number of ranked users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no user has any recorded activity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Insertion-ordered map from user to statistics.
#[derive(Default)]
struct Ledger {
    order: Vec<UserId>,
    stats: HashMap<UserId, ContributorStats>,
}

impl Ledger {
    fn entry(&mut self, profile: &UserProfile) -> &mut ContributorStats {
        self.entry_with(profile.id(), || ContributorStats::empty(profile))
    }

    /// Looks up a user known only by id. `fallback` supplies the snapshot
    /// when it is the poster; otherwise the user is recorded anonymously.
    fn entry_by_id(&mut self, user: &UserId, fallback: &UserProfile) -> &mut ContributorStats {
        self.entry_with(user, || {
            if fallback.id() == user {
                ContributorStats::empty(fallback)
            } else {
                ContributorStats::empty(&UserProfile::new(user.clone(), ANONYMOUS_DISPLAY_NAME))
            }
        })
    }

    fn entry_with(
        &mut self,
        user: &UserId,
        create: impl FnOnce() -> ContributorStats,
    ) -> &mut ContributorStats {
        let Self { order, stats } = self;
        stats.entry(user.clone()).or_insert_with(|| {
            order.push(user.clone());
            create()
        })
    }

    /// Returns the statistics in first-appearance order.
    fn into_entries(self) -> Vec<ContributorStats> {
        let Self { order, mut stats } = self;
        order
            .into_iter()
            .filter_map(|user| stats.remove(&user))
            .collect()
    }
}
