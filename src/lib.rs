//! Taskboard: task tracking backend.
//!
//! Users with the roles Lead, Manager, and Member create, assign, and
//! progress tasks through a fixed lifecycle backed by a keyed record store.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, status transitions, and partial updates
//! - [`user`]: User records, roles, and identity resolution
//! - [`api`]: Request/response handlers and the HTTP router
//! - [`config`]: Layered process configuration
//! - [`store`]: `PostgreSQL` pool and schema plumbing

pub mod api;
pub mod config;
pub mod store;
pub mod task;
pub mod user;

#[cfg(test)]
mod test_support;
