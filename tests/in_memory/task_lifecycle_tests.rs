//! In-memory integration tests for task lifecycle operations.

use rstest::rstest;
use taskboard::task::{
    domain::{TaskStatus, TransitionPolicy},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest},
};
use taskboard::user::domain::UserRole;

use super::helpers::{Stores, stores};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigned_tasks_are_listed_oldest_first(stores: Stores) {
    let service = stores.service();
    let lead = stores.seed_user(UserRole::Lead).await;
    let member = stores.seed_user(UserRole::Member).await;

    let mut created = Vec::new();
    for title in ["First_task", "Second_task", "Third_task"] {
        let task = service
            .create_task(CreateTaskRequest::new(lead, title))
            .await
            .expect("task creation should succeed");
        service
            .assign_task(task.id(), lead, member)
            .await
            .expect("assign should succeed");
        created.push(task.id());
    }

    let listed: Vec<_> = service
        .tasks_assigned_to(member)
        .await
        .expect("listing should succeed")
        .iter()
        .map(|task| task.id())
        .collect();

    assert_eq!(listed, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_then_close_preserves_unrelated_fields(stores: Stores) {
    let service = stores.service();
    let manager = stores.seed_user(UserRole::Manager).await;
    let task = service
        .create_task(CreateTaskRequest::new(manager, "Audit_logs").with_description("weekly"))
        .await
        .expect("task creation should succeed");

    service
        .update_task(UpdateTaskRequest::new(task.id(), manager).with_description("monthly"))
        .await
        .expect("update should succeed");
    service
        .close_task(task.id(), manager)
        .await
        .expect("close should succeed");

    let stored = stores
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task exists");
    assert_eq!(stored.title().as_str(), "Audit_logs");
    assert_eq!(stored.description(), Some("monthly"));
    assert_eq!(stored.status(), TaskStatus::Close);
    assert_eq!(stored.date_created(), task.date_created());
    assert!(stored.date_closed().is_some());
    assert!(stored.date_started().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn enforced_and_unchecked_policies_diverge(stores: Stores) {
    let manager = stores.seed_user(UserRole::Manager).await;
    let task = stores
        .service()
        .create_task(CreateTaskRequest::new(manager, "Policy_check"))
        .await
        .expect("task creation should succeed");

    let enforced = stores.service().start_task(task.id(), manager).await;
    assert!(matches!(enforced, Err(TaskLifecycleError::Domain(_))));

    let unchecked = stores
        .service()
        .with_transition_policy(TransitionPolicy::Unchecked)
        .start_task(task.id(), manager)
        .await
        .expect("unchecked transition should succeed");
    assert_eq!(unchecked.status(), Some(TaskStatus::Inprogress));
}
