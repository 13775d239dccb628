//! `PostgreSQL` adapters for comment persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresCommentRepository;
