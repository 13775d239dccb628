//! Shared `PostgreSQL` plumbing for the Diesel adapters.
//!
//! Diesel connections are synchronous, so every adapter offloads its work to
//! the blocking thread pool with [`run_blocking_with`].

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

pub(crate) use crate::blocking::run_blocking_with;

/// `PostgreSQL` connection pool shared by all repository adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns the r2d2 pool error when the initial connections cannot be
/// established.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, diesel::r2d2::PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}
