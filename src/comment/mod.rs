//! Comment threads attached to tasks.
//!
//! Comments support a single level of replies through `parent_id` and keep
//! an append-only edit history. Unlike projects, tasks and attachments,
//! comments are hard-deleted, and deleting a comment leaves its replies in
//! place.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
