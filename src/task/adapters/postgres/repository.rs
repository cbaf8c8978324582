//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::store::PgPool;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskPatch, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
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
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
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

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<()> {
        let changeset = to_changeset(patch);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_assignee(&self, assignee: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_to.eq(assignee.into_inner()))
                .order(tasks::date_created.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        task_id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        created_by: task.created_by().into_inner(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        date_created: task.date_created(),
        date_started: task.date_started(),
        date_assigned: task.date_assigned(),
        date_completed: task.date_completed(),
        date_closed: task.date_closed(),
    }
}

fn to_changeset(patch: &TaskPatch) -> TaskChangeset {
    TaskChangeset {
        title: patch.title().map(|title| title.as_str().to_owned()),
        description: patch.description().map(str::to_owned),
        status: patch.status().map(|status| status.as_str().to_owned()),
        assigned_to: patch.assigned_to().map(UserId::into_inner),
        date_started: patch.date_started(),
        date_assigned: patch.date_assigned(),
        date_completed: patch.date_completed(),
        date_closed: patch.date_closed(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        task_id,
        title: persisted_title,
        description,
        status: persisted_status,
        created_by,
        assigned_to,
        date_created,
        date_started,
        date_assigned,
        date_completed,
        date_closed,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        task_id: TaskId::from_uuid(task_id),
        title,
        description,
        date_created,
        date_started,
        date_assigned,
        date_completed,
        date_closed,
        status,
        created_by: UserId::from_uuid(created_by),
        assigned_to: assigned_to.map(UserId::from_uuid),
    }))
}
