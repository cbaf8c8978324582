//! `PostgreSQL` integration tests for task persistence.

use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{Task, TaskChanges, TaskId, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use taskboard::user::{
    adapters::postgres::PostgresUserRepository, domain::UserId, domain::UserRole,
    ports::UserRepository,
};

use rstest::rstest;

use super::helpers::{BoxError, TestDatabase, new_user, test_database};

fn draft(title: &str, creator: UserId) -> Result<Task, BoxError> {
    Ok(Task::new_draft(
        TaskTitle::new(title)?,
        Some("stored in postgres".to_owned()),
        creator,
        &DefaultClock,
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_store_and_find_round_trip(
    #[future] test_database: Result<TestDatabase, BoxError>,
) -> Result<(), BoxError> {
    let database = test_database.await?;
    let pool = database.pool.clone();
    let repo = PostgresTaskRepository::new(pool);
    let task = draft("Pg_round_trip", UserId::new())?;

    repo.store(&task).await?;
    let found = repo.find_by_id(task.id()).await?.ok_or("task missing")?;

    assert_eq!(found.id(), task.id());
    assert_eq!(found.title(), task.title());
    assert_eq!(found.description(), task.description());
    assert_eq!(found.status(), TaskStatus::Draft);
    assert_eq!(found.created_by(), task.created_by());
    assert_eq!(
        found.date_created().timestamp_micros(),
        task.date_created().timestamp_micros()
    );
    assert_eq!(found.date_started(), None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_duplicate_store_is_rejected(
    #[future] test_database: Result<TestDatabase, BoxError>,
) -> Result<(), BoxError> {
    let database = test_database.await?;
    let pool = database.pool.clone();
    let repo = PostgresTaskRepository::new(pool);
    let task = draft("Pg_duplicate", UserId::new())?;
    repo.store(&task).await?;

    let result = repo.store(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_update_writes_only_named_columns(
    #[future] test_database: Result<TestDatabase, BoxError>,
) -> Result<(), BoxError> {
    let database = test_database.await?;
    let pool = database.pool.clone();
    let repo = PostgresTaskRepository::new(pool);
    let task = draft("Pg_partial", UserId::new())?;
    repo.store(&task).await?;
    let assignee = UserId::new();
    let patch = TaskChanges::status_change(TaskStatus::Assigned, chrono::Utc::now())
        .with_assigned_to(assignee)
        .validate()?;

    repo.update(task.id(), &patch).await?;
    let found = repo.find_by_id(task.id()).await?.ok_or("task missing")?;

    assert_eq!(found.status(), TaskStatus::Assigned);
    assert_eq!(found.assigned_to(), Some(assignee));
    assert!(found.date_assigned().is_some());
    assert_eq!(found.title(), task.title());
    assert_eq!(found.description(), Some("stored in postgres"));
    assert_eq!(found.date_closed(), None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_update_and_delete_report_missing_tasks(
    #[future] test_database: Result<TestDatabase, BoxError>,
) -> Result<(), BoxError> {
    let database = test_database.await?;
    let pool = database.pool.clone();
    let repo = PostgresTaskRepository::new(pool);
    let missing = TaskId::new();
    let patch = TaskChanges::new().with_description("nothing").validate()?;

    let updated = repo.update(missing, &patch).await;
    let deleted = repo.delete(missing).await;

    assert!(matches!(updated, Err(TaskRepositoryError::NotFound(id)) if id == missing));
    assert!(matches!(deleted, Err(TaskRepositoryError::NotFound(id)) if id == missing));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_service_lists_assigned_tasks(
    #[future] test_database: Result<TestDatabase, BoxError>,
) -> Result<(), BoxError> {
    let database = test_database.await?;
    let pool = database.pool.clone();
    let tasks = Arc::new(PostgresTaskRepository::new(pool.clone()));
    let users = Arc::new(PostgresUserRepository::new(pool));
    let manager = new_user(UserRole::Manager);
    let member = new_user(UserRole::Member);
    users.store(&manager).await?;
    users.store(&member).await?;
    let service = TaskLifecycleService::new(Arc::clone(&tasks), users, Arc::new(DefaultClock));

    let task = service
        .create_task(CreateTaskRequest::new(manager.id(), "Pg_assigned"))
        .await?;
    service.assign_task(task.id(), manager.id(), member.id()).await?;
    let listed = service.tasks_assigned_to(member.id()).await?;

    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(Task::id), Some(task.id()));
    assert_eq!(listed.first().map(Task::status), Some(TaskStatus::Assigned));

    service.delete_task(task.id(), manager.id()).await?;
    assert!(tasks.find_by_id(task.id()).await?.is_none());
    Ok(())
}
