//! Step definitions for task lifecycle behaviour tests.

pub mod given;
pub mod when;
