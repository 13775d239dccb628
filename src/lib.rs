//! Atelier: project and task tracking backend.
//!
//! This crate provides the persistence-independent core of a project
//! tracker: projects that own tasks, a dependency graph between tasks, time
//! tracking, threaded comments with edit history, and versioned file
//! attachments.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and blob storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration of domain operations over the ports
//!
//! Callers pass an explicit [`identity::domain::Actor`] to operations that
//! record who performed them.
//!
//! # Modules
//!
//! - [`project`]: Project lifecycle, cascading deletes and completion metrics
//! - [`task`]: Tasks, dependency edges and logged hours
//! - [`comment`]: Threaded comments with edit history
//! - [`attachment`]: Versioned file attachments and blob stores
//! - [`identity`]: Actors and the user directory
//! - [`validation`]: Field rules and reference checks for incoming requests
//! - [`config`]: Runtime configuration

mod blocking;
mod ids;

pub mod attachment;
pub mod comment;
pub mod config;
pub mod identity;
pub mod postgres;
pub mod project;
pub mod task;
pub mod validation;

#[cfg(test)]
mod test_support;
