//! Repository contract tests for [`InMemoryTaskRepository`].

use super::helpers::{draft_task, user};
use bountyboard::bounty::{
    adapters::memory::InMemoryTaskRepository,
    domain::{BountyTask, Points, TaskCategory, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn repo() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_ids(repo: InMemoryTaskRepository) -> eyre::Result<()> {
    let task = draft_task(&user("poster", "Ada")?, 5)?;
    repo.store(&task).await?;

    let result = repo.store(&task).await;

    ensure!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_all_returns_newest_first(repo: InMemoryTaskRepository) -> eyre::Result<()> {
    let poster = user("poster", "Ada")?;
    let first = draft_task(&poster, 1)?;
    let second = draft_task(&poster, 2)?;
    let third = draft_task(&poster, 3)?;
    for task in [&first, &second, &third] {
        repo.store(task).await?;
    }

    let bounties: Vec<u64> = repo
        .list_all()
        .await?
        .iter()
        .map(BountyTask::bounty)
        .collect();

    ensure!(bounties == [3, 2, 1]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_is_conditional_on_revision(repo: InMemoryTaskRepository) -> eyre::Result<()> {
    let clock = DefaultClock;
    let poster = user("poster", "Ada")?;
    let task = draft_task(&poster, 20)?;
    repo.store(&task).await?;

    // Two writers load the same revision.
    let mut first = task.clone();
    let mut second = task.clone();
    first.claim(user("doer-a", "Alan")?, &clock)?;
    second.claim(user("doer-b", "Barbara")?, &clock)?;

    repo.update(&first, task.revision()).await?;
    let lost = repo.update(&second, task.revision()).await;

    ensure!(matches!(
        lost,
        Err(TaskRepositoryError::ConcurrentModification {
            expected: 0,
            actual: 1,
            ..
        })
    ));
    let stored = repo.find_by_id(task.id()).await?;
    let doer_id = stored
        .as_ref()
        .and_then(BountyTask::doer)
        .map(|doer| doer.id().as_str());
    ensure!(doer_id == Some("doer-a"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_pledges_keep_only_one_write(repo: InMemoryTaskRepository) -> eyre::Result<()> {
    let clock = DefaultClock;
    let task = draft_task(&user("poster", "Ada")?, 20)?;
    repo.store(&task).await?;

    let mut first = task.clone();
    let mut second = task.clone();
    first.pledge(user("a", "A")?, Points::new(10)?, &clock)?;
    second.pledge(user("b", "B")?, Points::new(7)?, &clock)?;

    repo.update(&first, 0).await?;
    ensure!(repo.update(&second, 0).await.is_err());

    let stored = repo.find_by_id(task.id()).await?;
    ensure!(stored.as_ref().map(BountyTask::bounty) == Some(30));
    ensure!(stored.as_ref().map(|found| found.pledges().len()) == Some(1));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_task_is_not_found(repo: InMemoryTaskRepository) -> eyre::Result<()> {
    let task = draft_task(&user("poster", "Ada")?, 20)?;
    let result = repo.update(&task, 0).await;
    ensure!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_where_filters_by_participant_and_status(
    repo: InMemoryTaskRepository,
) -> eyre::Result<()> {
    let clock = DefaultClock;
    let ada = user("ada", "Ada")?;
    let grace = user("grace", "Grace")?;
    let mut claimed = draft_task(&ada, 5)?;
    claimed.claim(grace.clone(), &clock)?;
    let open = draft_task(&grace, 5)?;
    repo.store(&claimed).await?;
    repo.store(&open).await?;

    let by_ada = repo.find_where(&TaskFilter::PostedBy(ada.id().clone())).await?;
    let by_grace = repo
        .find_where(&TaskFilter::ClaimedBy(grace.id().clone()))
        .await?;
    let still_open = repo
        .find_where(&TaskFilter::Status(TaskStatus::Open))
        .await?;
    let general = repo
        .find_where(&TaskFilter::Category(TaskCategory::General))
        .await?;
    let validated_by_ada = repo
        .find_where(&TaskFilter::ValidatedBy(ada.id().clone()))
        .await?;

    ensure!(by_ada.len() == 1 && by_ada.first().map(|t| t.id()) == Some(claimed.id()));
    ensure!(by_grace.len() == 1 && by_grace.first().map(|t| t.id()) == Some(claimed.id()));
    ensure!(still_open.len() == 1 && still_open.first().map(|t| t.id()) == Some(open.id()));
    ensure!(general.len() == 2);
    ensure!(validated_by_ada.is_empty());
    Ok(())
}
