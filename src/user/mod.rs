//! User directory for Taskboard.
//!
//! Users are created once and never mutated. Task lifecycle operations look
//! users up through the [`services::IdentityResolver`] to decide who may act
//! on a task. The module follows the same hexagonal layout as
//! [`crate::task`]:
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
