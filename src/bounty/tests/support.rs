//! Shared builders for bounty unit tests.

use crate::bounty::domain::{
    BountyDomainError, BountyTask, Points, Proof, TaskDraft, TaskLimits, UserId, UserProfile,
};
use mockable::DefaultClock;

pub(super) fn profile(id: &str, name: &str) -> Result<UserProfile, BountyDomainError> {
    Ok(UserProfile::new(UserId::new(id)?, name))
}

pub(super) fn open_task(poster: &UserProfile, bounty: u64) -> Result<BountyTask, BountyDomainError> {
    let draft = TaskDraft::new(
        "Clean up the riverbank",
        "Collect litter along the north bank",
        Points::new(bounty)?,
        &TaskLimits::default(),
    )?;
    Ok(BountyTask::post(poster.clone(), draft, &DefaultClock))
}

/// Drives a task through claim, proof and validation.
pub(super) fn validated_task(
    poster: &UserProfile,
    doer: &UserProfile,
    bounty: u64,
) -> Result<BountyTask, BountyDomainError> {
    let clock = DefaultClock;
    let mut task = open_task(poster, bounty)?;
    task.claim(doer.clone(), &clock)?;
    task.submit_proof(doer.id(), link_proof()?, &clock)?;
    task.validate(poster.id(), &clock)?;
    Ok(task)
}

pub(super) fn link_proof() -> Result<Proof, BountyDomainError> {
    Proof::new(Some("https://example.org/done".to_owned()), Vec::new())
}
