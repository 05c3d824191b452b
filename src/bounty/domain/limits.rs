//! Configurable limits applied when validating bounty input.

use super::{BountyDomainError, Points};

/// Input limits enforced before any write.
///
/// # Examples
///
/// ```
/// use bountyboard::bounty::domain::TaskLimits;
///
/// let limits = TaskLimits::default();
/// assert_eq!(limits.max_proof_images, 10);
///
/// let strict = TaskLimits::strict();
/// assert!(strict.max_title_length < limits.max_title_length);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLimits {
    /// Maximum title length in characters.
    pub max_title_length: usize,
    /// Maximum description length in characters.
    pub max_description_length: usize,
    /// Maximum number of proof images per submission.
    pub max_proof_images: usize,
    /// Largest single pledge in points.
    pub max_pledge_amount: u64,
}

impl Default for TaskLimits {
    fn default() -> Self {
        Self {
            max_title_length: 200,
            max_description_length: 5_000,
            max_proof_images: 10,
            max_pledge_amount: 1_000_000,
        }
    }
}

impl TaskLimits {
    /// Creates a permissive configuration with effectively no caps.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            max_title_length: usize::MAX,
            max_description_length: usize::MAX,
            max_proof_images: usize::MAX,
            max_pledge_amount: u64::MAX,
        }
    }

    /// Creates a strict configuration with reduced limits.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_title_length: 80,
            max_description_length: 1_000,
            max_proof_images: 4,
            max_pledge_amount: 1_000,
        }
    }

    /// Checks a pledge amount against [`Self::max_pledge_amount`].
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::PledgeTooLarge`] when the amount exceeds
    /// the limit.
    pub const fn check_pledge(&self, amount: Points) -> Result<(), BountyDomainError> {
        if amount.value() > self.max_pledge_amount {
            return Err(BountyDomainError::PledgeTooLarge {
                amount: amount.value(),
                max: self.max_pledge_amount,
            });
        }
        Ok(())
    }

    /// Checks a proof image count against [`Self::max_proof_images`].
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::TooManyProofImages`] when `count` exceeds
    /// the limit.
    pub const fn check_proof_images(&self, count: usize) -> Result<(), BountyDomainError> {
        if count > self.max_proof_images {
            return Err(BountyDomainError::TooManyProofImages {
                max: self.max_proof_images,
                actual: count,
            });
        }
        Ok(())
    }
}
