//! Task graph: tasks, their lifecycle, dependency edges and time tracking.
//!
//! Tasks belong to a project and carry a status and priority, optional
//! scheduling dates, estimated and logged hours, and free-form tags. Tasks
//! may depend on other tasks through a directed edge set; the graph performs
//! no cycle or self-loop detection and completing a task ignores the state of
//! its prerequisites. The module follows hexagonal architecture:
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
