//! Service-level errors for task lifecycle operations.

use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};
use crate::user::{
    domain::{UserId, UserRole},
    ports::UserRepositoryError,
};
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed (title format, empty update, or forbidden
    /// status transition).
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The acting user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The user a task should be assigned to does not exist.
    #[error("assignee not found: {0}")]
    AssigneeNotFound(UserId),

    /// The acting user's role does not permit the operation.
    #[error("user {user_id} with role {role} is not permitted to manage tasks")]
    NotAuthorized {
        /// Acting user.
        user_id: UserId,
        /// The user's role.
        role: UserRole,
    },

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Looking up a user failed in the store.
    #[error("identity lookup failed: {0}")]
    Identity(#[source] UserRepositoryError),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => Self::TaskNotFound(task_id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;
