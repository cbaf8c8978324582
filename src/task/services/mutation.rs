//! Validation and partial-update core shared by every task mutation.

use super::TaskLifecycleResult;
use crate::task::{
    domain::{TaskChanges, TaskId, TaskPatch},
    ports::TaskRepository,
};

/// Validates `changes` and writes exactly the fields it names to the task
/// keyed by `task_id`.
///
/// Validation happens before the store is touched: a malformed title or an
/// empty change set never reaches the repository. A successful call performs
/// a single keyed write with no read-back and returns the applied patch.
///
/// # Errors
///
/// Returns [`super::TaskLifecycleError::Domain`] on validation failure,
/// [`super::TaskLifecycleError::TaskNotFound`] when the task does not exist,
/// or [`super::TaskLifecycleError::Repository`] when the store fails.
pub async fn apply_partial_update<R>(
    repository: &R,
    task_id: TaskId,
    changes: TaskChanges,
) -> TaskLifecycleResult<TaskPatch>
where
    R: TaskRepository + ?Sized,
{
    let patch = changes.validate()?;
    repository.update(task_id, &patch).await?;
    tracing::debug!(
        task_id = %task_id,
        fields = ?patch.field_names(),
        "applied partial task update"
    );
    Ok(patch)
}
