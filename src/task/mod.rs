//! Task lifecycle management for Taskboard.
//!
//! Tasks are created in draft by a lead or manager, assigned to a user, and
//! progressed through `Draft → Assigned → Inprogress → Complete`, with
//! `Close` reachable from any open status. All mutations go through a single
//! partial-update core that validates the proposed fields and writes only
//! those fields. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
