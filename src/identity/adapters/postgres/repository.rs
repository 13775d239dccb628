//! `PostgreSQL` user directory implementation.

use super::schema::users;
use crate::identity::{
    domain::{UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use crate::postgres::{PgPool, run_blocking_with};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct UserRow {
    id: uuid::Uuid,
    name: String,
    email: String,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self::new(UserId::from_uuid(row.id), row.name, row.email)
    }
}

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = pool.get().map_err(UserDirectoryError::persistence)?;
                f(&mut connection)
            },
            UserDirectoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserProfile>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            Ok(row.map(UserProfile::from))
        })
        .await
    }

    async fn find_many(&self, ids: &[UserId]) -> UserDirectoryResult<Vec<UserProfile>> {
        let lookup: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::id.eq_any(lookup))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserDirectoryError::persistence)?;
            Ok(rows.into_iter().map(UserProfile::from).collect())
        })
        .await
    }
}
