//! `PostgreSQL` repository implementation for bounty task storage.

use super::{
    models::{TaskRecord, TaskRow},
    schema::bounty_tasks,
};
use crate::bounty::{
    domain::{
        BountyTask, PersistedTaskData, Pledge, Proof, TaskCategory, TaskId, TaskStatus, UserId,
        UserProfile,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::dsl::Desc;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by bounty adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &BountyTask) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(bounty_tasks::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        task: &BountyTask,
        expected_revision: u64,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task)?;
        let expected = to_i64(expected_revision)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                bounty_tasks::table
                    .filter(bounty_tasks::id.eq(task_id.into_inner()))
                    .filter(bounty_tasks::revision.eq(expected)),
            )
            .set(&record)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if affected > 0 {
                return Ok(());
            }

            // Nothing matched: either the row is gone or its revision moved.
            let actual = bounty_tasks::table
                .filter(bounty_tasks::id.eq(task_id.into_inner()))
                .select(bounty_tasks::revision)
                .first::<i64>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            match actual {
                None => Err(TaskRepositoryError::NotFound(task_id)),
                Some(actual) => Err(TaskRepositoryError::ConcurrentModification {
                    task_id,
                    expected: expected_revision,
                    actual: to_u64(actual)?,
                }),
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<BountyTask>> {
        self.run_blocking(move |connection| {
            let row = bounty_tasks::table
                .filter(bounty_tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<BountyTask>> {
        self.run_blocking(move |connection| {
            let rows = bounty_tasks::table
                .order(newest_first())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_where(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<BountyTask>> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let query = bounty_tasks::table
                .order(newest_first())
                .select(TaskRow::as_select())
                .into_boxed();
            let query = match &filter {
                TaskFilter::PostedBy(user) => {
                    query.filter(bounty_tasks::poster_id.eq(user.as_str().to_owned()))
                }
                TaskFilter::ClaimedBy(user) => {
                    query.filter(bounty_tasks::doer_id.eq(user.as_str().to_owned()))
                }
                TaskFilter::ValidatedBy(user) => {
                    query.filter(bounty_tasks::validator_id.eq(user.as_str().to_owned()))
                }
                TaskFilter::Status(status) => {
                    query.filter(bounty_tasks::status.eq(status.as_str()))
                }
                TaskFilter::Category(category) => {
                    query.filter(bounty_tasks::category.eq(category.as_str()))
                }
            };
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_i64(value: u64) -> TaskRepositoryResult<i64> {
    i64::try_from(value).map_err(TaskRepositoryError::persistence)
}

fn to_u64(value: i64) -> TaskRepositoryResult<u64> {
    u64::try_from(value).map_err(TaskRepositoryError::persistence)
}

fn to_json(value: &impl serde::Serialize) -> TaskRepositoryResult<serde_json::Value> {
    serde_json::to_value(value).map_err(TaskRepositoryError::persistence)
}

fn from_json<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> TaskRepositoryResult<T> {
    serde_json::from_value(value).map_err(TaskRepositoryError::persistence)
}

fn to_record(task: &BountyTask) -> TaskRepositoryResult<TaskRecord> {
    Ok(TaskRecord {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        category: task.category().as_str().to_owned(),
        location: task.location().map(str::to_owned),
        image_url: task.image_url().map(str::to_owned),
        poster_id: task.poster().id().as_str().to_owned(),
        poster: to_json(task.poster())?,
        doer_id: task.doer().map(|doer| doer.id().as_str().to_owned()),
        doer: task.doer().map(to_json).transpose()?,
        validator_id: task.validator().map(|id| id.as_str().to_owned()),
        bounty: to_i64(task.bounty())?,
        original_bounty: task.original_bounty().map(to_i64).transpose()?,
        pledges: to_json(&task.pledges())?,
        proof: task.proof().map(to_json).transpose()?,
        status: task.status().as_str().to_owned(),
        revision: to_i64(task.revision())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<BountyTask> {
    let TaskRow {
        id,
        title,
        description,
        category,
        location,
        image_url,
        poster_id: _,
        poster,
        doer_id: _,
        doer,
        validator_id,
        bounty,
        original_bounty,
        pledges,
        proof,
        status,
        revision,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        category: TaskCategory::try_from(category.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        location,
        image_url,
        poster: from_json::<UserProfile>(poster)?,
        doer: doer.map(from_json::<UserProfile>).transpose()?,
        validator: validator_id
            .map(UserId::new)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        bounty: to_u64(bounty)?,
        original_bounty: original_bounty.map(to_u64).transpose()?,
        pledges: from_json::<Vec<Pledge>>(pledges)?,
        proof: proof.map(from_json::<Proof>).transpose()?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        revision: to_u64(revision)?,
        created_at,
        updated_at,
    };
    BountyTask::from_persisted(data).map_err(TaskRepositoryError::persistence)
}

/// Board ordering: newest first, later inserts first on equal timestamps.
fn newest_first() -> (
    Desc<bounty_tasks::created_at>,
    Desc<bounty_tasks::insert_seq>,
) {
    (
        bounty_tasks::created_at.desc(),
        bounty_tasks::insert_seq.desc(),
    )
}
