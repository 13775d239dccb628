//! Project aggregation: project lifecycle and task completion metrics.
//!
//! A project owns its tasks. Deleting a project soft-deletes the project and
//! then every live task it owns; metrics are computed from the live tasks at
//! query time. The module follows hexagonal architecture:
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
