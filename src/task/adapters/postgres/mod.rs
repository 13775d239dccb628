//! `PostgreSQL` adapters for task graph persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskRepository;
