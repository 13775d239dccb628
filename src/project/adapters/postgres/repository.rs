//! `PostgreSQL` repository implementation for project storage.

use super::{
    models::{NewProjectRow, ProjectChangeset, ProjectRow},
    schema::projects,
};
use crate::identity::domain::UserId;
use crate::postgres::{PgPool, run_blocking_with};
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectId, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
                f(&mut connection)
            },
            ProjectRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = to_new_row(project);

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let changeset = to_changeset(project);

        self.run_blocking(move |connection| {
            let target = projects::table.filter(projects::id.eq(project_id.into_inner()));
            let updated = diesel::update(target)
                .set(&changeset)
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .filter(projects::deleted_at.is_null())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list(&self, status: Option<ProjectStatus>) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let mut query = projects::table
                .filter(projects::deleted_at.is_null())
                .select(ProjectRow::as_select())
                .into_boxed();
            if let Some(wanted) = status {
                query = query.filter(projects::status.eq(wanted.as_str()));
            }
            let rows = query
                .order(projects::created_at.desc())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }
}

fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().map(str::to_owned),
        start_date: project.start_date(),
        end_date: project.end_date(),
        status: project.status().as_str().to_owned(),
        owner_id: project.owner_id().into_inner(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
        deleted_at: project.deleted_at(),
    }
}

fn to_changeset(project: &Project) -> ProjectChangeset {
    ProjectChangeset {
        name: project.name().to_owned(),
        description: project.description().map(str::to_owned),
        start_date: project.start_date(),
        end_date: project.end_date(),
        status: project.status().as_str().to_owned(),
        updated_at: project.updated_at(),
        deleted_at: project.deleted_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
        start_date,
        end_date,
        status: persisted_status,
        owner_id,
        created_at,
        updated_at,
        deleted_at,
    } = row;

    let status = ProjectStatus::try_from(persisted_status.as_str())
        .map_err(ProjectRepositoryError::invalid_persisted_data)?;

    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name,
        description,
        start_date,
        end_date,
        status,
        owner_id: UserId::from_uuid(owner_id),
        created_at,
        updated_at,
        deleted_at,
    }))
}
