//! Application services for task lifecycle orchestration.

mod error;
mod lifecycle;
mod mutation;

pub use error::{TaskLifecycleError, TaskLifecycleResult};
pub use lifecycle::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest};
pub use mutation::apply_partial_update;
