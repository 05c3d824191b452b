//! Error types for bounty domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned by bounty domain constructors and lifecycle transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BountyDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The task title exceeds the configured limit.
    #[error("task title exceeds {max} characters")]
    TitleTooLong {
        /// Configured maximum length in characters.
        max: usize,
    },

    /// The task description exceeds the configured limit.
    #[error("task description exceeds {max} characters")]
    DescriptionTooLong {
        /// Configured maximum length in characters.
        max: usize,
    },

    /// A bounty or pledge amount was zero.
    #[error("point amount must be at least 1, got {0}")]
    NonPositiveAmount(u64),

    /// A pledge amount exceeds the configured limit.
    #[error("pledge of {amount} points exceeds the limit of {max}")]
    PledgeTooLarge {
        /// Requested pledge amount.
        amount: u64,
        /// Configured maximum pledge amount.
        max: u64,
    },

    /// Adding a pledge would overflow the bounty counter.
    #[error("bounty for task {0} would overflow")]
    BountyOverflow(TaskId),

    /// Proof was submitted with neither a URL nor any image.
    #[error("proof requires a URL or at least one image")]
    MissingProof,

    /// Proof carries more images than allowed.
    #[error("proof has {actual} images, at most {max} allowed")]
    TooManyProofImages {
        /// Configured maximum image count.
        max: usize,
        /// Submitted image count.
        actual: usize,
    },

    /// The lifecycle state machine does not allow the requested move.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// Pledges are only accepted while a task is open.
    #[error("task {task_id} is {status} and no longer accepts pledges")]
    NotOpenForPledges {
        /// Task that rejected the pledge.
        task_id: TaskId,
        /// Current status.
        status: TaskStatus,
    },

    /// The poster attempted to claim their own task.
    #[error("task {0} cannot be claimed by its poster")]
    SelfClaim(TaskId),

    /// The caller is not the doer recorded on the task.
    #[error("only the doer of task {0} may submit proof")]
    NotDoer(TaskId),

    /// The caller is not the poster recorded on the task.
    #[error("only the poster of task {0} may perform this action")]
    NotPoster(TaskId),

    /// A reconstructed bounty disagrees with its original amount and pledges.
    #[error("task {task_id} has bounty {bounty}, but its pledge history adds up to {expected}")]
    InconsistentBounty {
        /// Task being reconstructed.
        task_id: TaskId,
        /// Stored bounty.
        bounty: u64,
        /// Original bounty plus all pledged amounts.
        expected: u64,
    },
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task categories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task category: {0}")]
pub struct ParseTaskCategoryError(pub String);

/// Error returned while parsing leaderboard sort keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown leaderboard sort key: {0}")]
pub struct ParseLeaderboardSortError(pub String);
