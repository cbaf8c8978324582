//! Adapter implementations for the user directory ports.

pub mod memory;
pub mod postgres;
