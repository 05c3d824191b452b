//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::bounty::{
    domain::{BountyTask, TaskId},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, BountyTask>,
    insertion_order: Vec<TaskId>,
}

impl InMemoryTaskState {
    /// Collects matching tasks, newest first. Tasks created at the same
    /// instant keep reverse insertion order.
    fn collect_newest_first(&self, predicate: impl Fn(&BountyTask) -> bool) -> Vec<BountyTask> {
        let mut matching: Vec<BountyTask> = self
            .insertion_order
            .iter()
            .rev()
            .filter_map(|id| self.tasks.get(id))
            .filter(|task| predicate(task))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        matching
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &BountyTask) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(
        &self,
        task: &BountyTask,
        expected_revision: u64,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        // Check and swap happen under the same write lock.
        if stored.revision() != expected_revision {
            return Err(TaskRepositoryError::ConcurrentModification {
                task_id: task.id(),
                expected: expected_revision,
                actual: stored.revision(),
            });
        }
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<BountyTask>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<BountyTask>> {
        let state = self.read()?;
        Ok(state.collect_newest_first(|_| true))
    }

    async fn find_where(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<BountyTask>> {
        let state = self.read()?;
        Ok(state.collect_newest_first(|task| filter.matches(task)))
    }
}
