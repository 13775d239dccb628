//! Step definitions for project deletion scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
