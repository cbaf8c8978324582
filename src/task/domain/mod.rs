//! Domain model for task lifecycle management.
//!
//! Tasks move through a fixed set of statuses. Every change to a stored task
//! is expressed as a [`TaskPatch`] naming exactly the fields it sets, so the
//! domain never needs to rewrite a whole record.

mod changes;
mod error;
mod ids;
mod status;
mod task;
mod title;

pub use changes::{TaskChanges, TaskPatch};
pub use error::{ParseTaskStatusError, ParseTransitionPolicyError, TaskDomainError};
pub use ids::TaskId;
pub use status::{TaskStatus, TransitionPolicy};
pub use task::{PersistedTaskData, Task};
pub use title::TaskTitle;
