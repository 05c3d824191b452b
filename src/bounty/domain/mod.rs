//! Domain model for the bounty lifecycle and contribution aggregation.
//!
//! The domain owns every business rule: who may move a task along its
//! lifecycle, how pledges grow a bounty, and how statistics are derived.
//! Infrastructure concerns stay outside this boundary.

mod category;
mod dashboard;
mod error;
mod identity;
mod ids;
mod leaderboard;
mod limits;
mod pledge;
mod points;
mod proof;
mod status;
mod task;

pub use category::TaskCategory;
pub use dashboard::{DashboardStats, UserDashboard};
pub use error::{
    BountyDomainError, ParseLeaderboardSortError, ParseTaskCategoryError, ParseTaskStatusError,
};
pub use identity::{ANONYMOUS_DISPLAY_NAME, SignedInIdentity, UserProfile};
pub use ids::{TaskId, UserId};
pub use leaderboard::{ContributorStats, Leaderboard, LeaderboardSort};
pub use limits::TaskLimits;
pub use pledge::Pledge;
pub use points::Points;
pub use proof::Proof;
pub use status::TaskStatus;
pub use task::{BountyTask, PersistedTaskData, TaskDraft};
