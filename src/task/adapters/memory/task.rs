//! In-memory repository for tasks and their dependency edges.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    /// Every task ever stored, in insertion order.
    tasks: Vec<Task>,
    /// Outgoing dependency edges keyed by the dependent task.
    dependencies: HashMap<TaskId, Vec<TaskId>>,
}

impl InMemoryTaskState {
    fn live(&self) -> impl DoubleEndedIterator<Item = &Task> {
        self.tasks.iter().filter(|task| !task.is_deleted())
    }

    fn newest_first(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
        let mut listed: Vec<Task> = self
            .live()
            .rev()
            .filter(|task| predicate(task))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        listed
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.iter().any(|existing| existing.id() == task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.push(task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .tasks
            .iter_mut()
            .find(|existing| existing.id() == task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.live().find(|task| task.id() == id).cloned())
    }

    async fn find_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(ids
            .iter()
            .filter_map(|id| state.live().find(|task| task.id() == *id).cloned())
            .collect())
    }

    async fn list_by_project(
        &self,
        project_id: ProjectId,
        filter: TaskFilter,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.newest_first(|task| task.project_id() == project_id && filter.matches(task)))
    }

    async fn list_by_owner(&self, owner_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.newest_first(|task| task.owner_id() == owner_id))
    }

    async fn soft_delete_by_project(
        &self,
        project_id: ProjectId,
        deleted_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<u64> {
        let mut state = self.state.write().map_err(lock_error)?;
        let mut affected = 0_u64;
        for slot in state
            .tasks
            .iter_mut()
            .filter(|task| task.project_id() == project_id && !task.is_deleted())
        {
            slot.soft_delete_at(deleted_at);
            affected = affected.saturating_add(1);
        }
        Ok(affected)
    }

    async fn add_dependency(
        &self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let edges = state.dependencies.entry(task_id).or_default();
        if !edges.contains(&dependency_id) {
            edges.push(dependency_id);
        }
        Ok(())
    }

    async fn remove_dependency(
        &self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(edges) = state.dependencies.get_mut(&task_id) {
            edges.retain(|id| *id != dependency_id);
            if edges.is_empty() {
                state.dependencies.remove(&task_id);
            }
        }
        Ok(())
    }

    async fn dependency_ids(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .dependencies
            .get(&task_id)
            .cloned()
            .unwrap_or_default())
    }
}
