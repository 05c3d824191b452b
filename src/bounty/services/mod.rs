//! Application services for bounty orchestration.

mod leaderboard;
mod lifecycle;

pub use leaderboard::LeaderboardService;
pub use lifecycle::{
    BoardFilter, BountyLifecycleError, BountyLifecycleResult, BountyLifecycleService,
    PostTaskRequest, SubmitProofRequest, require_actor,
};
