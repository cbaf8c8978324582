//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskPatch},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        let task = tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.apply_patch(patch);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn find_by_assignee(&self, assignee: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        let mut assigned: Vec<Task> = tasks
            .values()
            .filter(|task| task.assigned_to() == Some(assignee))
            .cloned()
            .collect();
        assigned.sort_by_key(Task::date_created);
        Ok(assigned)
    }
}
