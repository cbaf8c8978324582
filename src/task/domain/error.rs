//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or changing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title contains characters outside `[A-Za-z0-9#_]` or its length
    /// is not strictly between 3 and 30.
    #[error("invalid task title '{0}'")]
    InvalidTitle(String),

    /// A change set named no fields.
    #[error("task update must name at least one field")]
    EmptyUpdate,

    /// The requested status is not reachable from the current status.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Task being changed.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a transition policy from configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transition policy '{0}', expected enforced or unchecked")]
pub struct ParseTransitionPolicyError(pub String);
