//! Step definitions for attachment versioning scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
