//! In-memory integration tests for bounty lifecycle flows.

use super::helpers::{Board, board, user};
use bountyboard::bounty::{
    domain::{BountyDomainError, TaskStatus},
    ports::{BlobRef, BlobUpload, TaskRepositoryError},
    services::{BountyLifecycleError, PostTaskRequest, SubmitProofRequest},
};
use eyre::{OptionExt, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stacking_two_pledges_onto_a_new_task(board: Board) -> eyre::Result<()> {
    let poster = user("poster", "Ada")?;
    let task = board
        .lifecycle
        .post_task(&poster, PostTaskRequest::new("Title", "Description", 20))
        .await?;

    board
        .lifecycle
        .pledge(&user("x", "Xavier")?, task.id(), 10)
        .await?;
    board
        .lifecycle
        .pledge(&user("y", "Yara")?, task.id(), 5)
        .await?;

    let stored = board
        .lifecycle
        .find_by_id(task.id())
        .await?
        .ok_or_eyre("task missing")?;
    ensure!(stored.bounty() == 35);
    ensure!(stored.original_bounty() == Some(20));
    ensure!(stored.pledges().len() == 2);
    ensure!(stored.status() == TaskStatus::Open);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pledging_a_claimed_task_is_rejected_without_change(board: Board) -> eyre::Result<()> {
    let poster = user("poster", "Ada")?;
    let task = board
        .lifecycle
        .post_task(&poster, PostTaskRequest::new("Title", "Description", 20))
        .await?;
    board.lifecycle.claim(&user("doer", "Grace")?, task.id()).await?;

    let result = board.lifecycle.pledge(&poster, task.id(), 10).await;

    ensure!(matches!(
        result,
        Err(BountyLifecycleError::Domain(
            BountyDomainError::NotOpenForPledges {
                status: TaskStatus::Claimed,
                ..
            }
        ))
    ));
    let stored = board
        .lifecycle
        .find_by_id(task.id())
        .await?
        .ok_or_eyre("task missing")?;
    ensure!(stored.bounty() == 20);
    ensure!(stored.pledges().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn poster_cannot_claim_own_task(board: Board) -> eyre::Result<()> {
    let poster = user("poster", "Ada")?;
    let task = board
        .lifecycle
        .post_task(&poster, PostTaskRequest::new("Title", "Description", 20))
        .await?;

    let result = board.lifecycle.claim(&poster, task.id()).await;

    ensure!(matches!(
        result,
        Err(BountyLifecycleError::Domain(BountyDomainError::SelfClaim(_)))
    ));
    let stored = board
        .lifecycle
        .find_by_id(task.id())
        .await?
        .ok_or_eyre("task missing")?;
    ensure!(stored.status() == TaskStatus::Open);
    ensure!(stored.doer().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_claims_yield_exactly_one_doer(board: Board) -> eyre::Result<()> {
    let poster = user("poster", "Ada")?;
    let task = board
        .lifecycle
        .post_task(&poster, PostTaskRequest::new("Title", "Description", 20))
        .await?;
    let alan = user("alan", "Alan")?;
    let barbara = user("barbara", "Barbara")?;

    let (first, second) = tokio::join!(
        board.lifecycle.claim(&alan, task.id()),
        board.lifecycle.claim(&barbara, task.id()),
    );

    let winners = [first.is_ok(), second.is_ok()]
        .iter()
        .filter(|won| **won)
        .count();
    ensure!(winners == 1);
    for loser in [first, second].into_iter().filter_map(Result::err) {
        ensure!(matches!(
            loser,
            BountyLifecycleError::Repository(TaskRepositoryError::ConcurrentModification { .. })
                | BountyLifecycleError::Domain(BountyDomainError::InvalidStateTransition { .. })
        ));
    }
    let stored = board
        .lifecycle
        .find_by_id(task.id())
        .await?
        .ok_or_eyre("task missing")?;
    ensure!(stored.revision() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn proof_images_land_under_proof_prefix(board: Board) -> eyre::Result<()> {
    let poster = user("poster", "Ada")?;
    let doer = user("doer", "Grace")?;
    let task = board
        .lifecycle
        .post_task(&poster, PostTaskRequest::new("Title", "Description", 20))
        .await?;
    board.lifecycle.claim(&doer, task.id()).await?;

    let completed = board
        .lifecycle
        .submit_proof(
            &doer,
            SubmitProofRequest::new(task.id())
                .with_image(BlobUpload::new("before.png", vec![1]))
                .with_image(BlobUpload::new("after.png", vec![2])),
        )
        .await?;

    let proof = completed.proof().ok_or_eyre("proof missing")?;
    ensure!(proof.url().is_none());
    ensure!(proof.images().len() == 2);
    for url in proof.images() {
        let reference = url
            .strip_prefix("memory://")
            .ok_or_eyre("unexpected blob URL scheme")?;
        ensure!(reference.starts_with("proof-images/"));
        ensure!(board.blobs.contents(&BlobRef::new(reference))?.is_some());
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_task_leaves_the_open_board(board: Board) -> eyre::Result<()> {
    let poster = user("poster", "Ada")?;
    let task = board
        .lifecycle
        .post_task(&poster, PostTaskRequest::new("Title", "Description", 20))
        .await?;

    let cancelled = board.lifecycle.cancel(&poster, task.id()).await?;
    ensure!(cancelled.status() == TaskStatus::Cancelled);

    let late_claim = board.lifecycle.claim(&user("doer", "Grace")?, task.id()).await;
    ensure!(matches!(
        late_claim,
        Err(BountyLifecycleError::Domain(
            BountyDomainError::InvalidStateTransition { .. }
        ))
    ));
    Ok(())
}
