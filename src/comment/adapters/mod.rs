//! Adapter implementations for comment persistence.

pub mod memory;
pub mod postgres;
