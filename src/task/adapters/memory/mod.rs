//! In-memory adapters for task lifecycle tests and local runs.

mod task;

pub use task::InMemoryTaskRepository;
