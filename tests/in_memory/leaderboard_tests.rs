//! Leaderboard projection over tasks stored through the lifecycle service.

use super::helpers::{Board, board, user};
use bountyboard::bounty::{
    domain::LeaderboardSort,
    services::{PostTaskRequest, SubmitProofRequest},
};
use eyre::{OptionExt, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leaderboard_reflects_earned_and_stacked_points(board: Board) -> eyre::Result<()> {
    let alice = user("alice", "Alice")?;
    let bob = user("bob", "Bob")?;
    let lifecycle = &board.lifecycle;

    let done = lifecycle
        .post_task(&alice, PostTaskRequest::new("Fix gate", "Oil the hinges", 10))
        .await?;
    lifecycle.claim(&bob, done.id()).await?;
    lifecycle
        .submit_proof(
            &bob,
            SubmitProofRequest::new(done.id()).with_url("https://example.org/gate"),
        )
        .await?;
    lifecycle.validate(&alice, done.id()).await?;

    let funded = lifecycle
        .post_task(&bob, PostTaskRequest::new("Plant trees", "Six saplings", 3))
        .await?;
    lifecycle.pledge(&alice, funded.id(), 5).await?;

    let total = board.leaderboard.leaderboard(LeaderboardSort::Total).await?;
    let leader = total.entries().first().ok_or_eyre("empty leaderboard")?;
    ensure!(leader.user_id.as_str() == "bob");
    ensure!(leader.points_earned == 10);

    let alice_stats = total.stats_for(alice.id()).ok_or_eyre("alice missing")?;
    ensure!(alice_stats.points_stacked == 5);
    ensure!(alice_stats.tasks_validated == 1);
    ensure!(total.rank_of(alice.id()) == Some(2));

    let stacked = board
        .leaderboard
        .leaderboard(LeaderboardSort::Stacked)
        .await?;
    ensure!(stacked.rank_of(alice.id()) == Some(1));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_builds_are_identical(board: Board) -> eyre::Result<()> {
    for (id, name) in [("c", "Carol"), ("d", "Dave"), ("e", "Eve")] {
        board
            .lifecycle
            .post_task(&user(id, name)?, PostTaskRequest::new("Title", "Body", 1))
            .await?;
    }

    let first = board.leaderboard.leaderboard(LeaderboardSort::Total).await?;
    let second = board.leaderboard.leaderboard(LeaderboardSort::Total).await?;

    ensure!(first == second);
    ensure!(first.len() == 3);
    Ok(())
}
