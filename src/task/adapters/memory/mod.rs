//! In-memory adapters for the task graph.

mod task;

pub use task::InMemoryTaskRepository;
