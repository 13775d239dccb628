//! `PostgreSQL` adapter reading the identity provider's `users` table.

mod repository;
mod schema;

pub use repository::PostgresUserDirectory;
