//! Then steps for bounty lifecycle BDD scenarios.

use super::world::{BountyWorld, member, run_async};
use bountyboard::bounty::{
    domain::{BountyDomainError, LeaderboardSort, TaskStatus},
    services::BountyLifecycleError,
};
use rstest_bdd_macros::then;

#[then("the bounty is {bounty:u64}")]
fn bounty_is(world: &BountyWorld, bounty: u64) -> Result<(), eyre::Report> {
    let task = world.stored_task()?;
    eyre::ensure!(
        task.bounty() == bounty,
        "expected bounty {bounty}, found {}",
        task.bounty()
    );
    Ok(())
}

#[then("the original bounty is {original:u64}")]
fn original_bounty_is(world: &BountyWorld, original: u64) -> Result<(), eyre::Report> {
    let task = world.stored_task()?;
    eyre::ensure!(
        task.original_bounty() == Some(original),
        "expected original bounty {original}, found {:?}",
        task.original_bounty()
    );
    Ok(())
}

#[then("the task has {count:usize} pledges")]
fn pledge_count_is(world: &BountyWorld, count: usize) -> Result<(), eyre::Report> {
    let task = world.stored_task()?;
    eyre::ensure!(
        task.pledges().len() == count,
        "expected {count} pledges, found {}",
        task.pledges().len()
    );
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &BountyWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.stored_task()?;
    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

fn last_error(world: &BountyWorld) -> Result<&BountyLifecycleError, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(task)) => Err(eyre::eyre!("expected failure, task {} succeeded", task.id())),
        None => Err(eyre::eyre!("no operation was attempted")),
    }
}

#[then("the operation fails because the task is not open for pledges")]
fn fails_not_open(world: &BountyWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(
            err,
            BountyLifecycleError::Domain(BountyDomainError::NotOpenForPledges { .. })
        ),
        "expected NotOpenForPledges, got {err:?}"
    );
    Ok(())
}

#[then("the operation fails with a self-claim error")]
fn fails_self_claim(world: &BountyWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, BountyLifecycleError::Domain(BountyDomainError::SelfClaim(_))),
        "expected SelfClaim, got {err:?}"
    );
    Ok(())
}

#[then("the operation fails with a missing proof error")]
fn fails_missing_proof(world: &BountyWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, BountyLifecycleError::Domain(BountyDomainError::MissingProof)),
        "expected MissingProof, got {err:?}"
    );
    Ok(())
}

#[then(
    r#""{user}" ranks {rank:usize} on the "{sort_key}" leaderboard with {earned:u64} points earned"#
)]
fn ranks_on_leaderboard(
    world: &BountyWorld,
    user: String,
    rank: usize,
    sort_key: String,
    earned: u64,
) -> Result<(), eyre::Report> {
    let sort = LeaderboardSort::try_from(sort_key.as_str())
        .map_err(|err| eyre::eyre!("invalid sort key in scenario: {err}"))?;
    let profile = member(&user)?;
    let board = run_async(world.leaderboard.leaderboard(sort))?;

    eyre::ensure!(
        board.rank_of(profile.id()) == Some(rank),
        "expected {user} at rank {rank}, found {:?}",
        board.rank_of(profile.id())
    );
    let stats = board
        .stats_for(profile.id())
        .ok_or_else(|| eyre::eyre!("{user} missing from leaderboard"))?;
    eyre::ensure!(
        stats.points_earned == earned,
        "expected {earned} points earned, found {}",
        stats.points_earned
    );
    Ok(())
}
