//! Positive point amounts used for bounties and pledges.

use super::BountyDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point amount of at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Points(u64);

impl Points {
    /// Creates a validated point amount.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::NonPositiveAmount`] when `value` is zero.
    pub const fn new(value: u64) -> Result<Self, BountyDomainError> {
        if value == 0 {
            return Err(BountyDomainError::NonPositiveAmount(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying amount.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Points {
    type Error = BountyDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Points> for u64 {
    fn from(points: Points) -> Self {
        points.0
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pts", self.0)
    }
}
