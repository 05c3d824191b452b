//! Pledges stacked onto an open task's bounty.

use super::{Points, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An additional point contribution recorded on a task.
///
/// Pledges are append-only; once recorded they are never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pledge {
    contributor: UserProfile,
    amount: Points,
    pledged_at: DateTime<Utc>,
}

impl Pledge {
    /// Creates a pledge record.
    #[must_use]
    pub const fn new(contributor: UserProfile, amount: Points, pledged_at: DateTime<Utc>) -> Self {
        Self {
            contributor,
            amount,
            pledged_at,
        }
    }

    /// Returns the contributor snapshot.
    #[must_use]
    pub const fn contributor(&self) -> &UserProfile {
        &self.contributor
    }

    /// Returns the pledged amount.
    #[must_use]
    pub const fn amount(&self) -> Points {
        self.amount
    }

    /// Returns when the pledge was recorded.
    #[must_use]
    pub const fn pledged_at(&self) -> DateTime<Utc> {
        self.pledged_at
    }
}
