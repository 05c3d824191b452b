//! Bounty task lifecycle status and transition rules.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a bounty task.
///
/// Statuses only ever advance: `open → claimed → completed → validated`,
/// with `cancelled` reachable from `open` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is listed and accepts pledges and claims.
    Open,
    /// A doer has taken ownership of the task.
    Claimed,
    /// The doer has submitted proof of completion.
    Completed,
    /// The poster confirmed the proof; payout is attributed to the doer.
    Validated,
    /// The poster withdrew the task before anyone claimed it.
    Cancelled,
}

impl TaskStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::Claimed,
        Self::Completed,
        Self::Validated,
        Self::Cancelled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Claimed => "claimed",
            Self::Completed => "completed",
            Self::Validated => "validated",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether the state machine permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Claimed | Self::Cancelled)
                | (Self::Claimed, Self::Completed)
                | (Self::Completed, Self::Validated)
        )
    }

    /// Returns whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Validated | Self::Cancelled)
    }

    /// Position along the lifecycle, used to check forward progress.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Claimed => 1,
            Self::Completed => 2,
            Self::Validated | Self::Cancelled => 3,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "claimed" => Ok(Self::Claimed),
            "completed" => Ok(Self::Completed),
            "validated" => Ok(Self::Validated),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
