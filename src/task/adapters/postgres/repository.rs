//! `PostgreSQL` repository implementation for task graph storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::{task_dependencies, tasks},
};
use crate::identity::domain::UserId;
use crate::postgres::{PgPool, run_blocking_with};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Hours, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task)?;

        self.run_blocking(move |connection| {
            let target = tasks::table.filter(tasks::id.eq(task_id.into_inner()));
            let updated = diesel::update(target)
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        let order: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq_any(order.clone()))
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let mut by_id: HashMap<uuid::Uuid, TaskRow> =
                rows.into_iter().map(|row| (row.id, row)).collect();
            order
                .iter()
                .filter_map(|id| by_id.remove(id))
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn list_by_project(
        &self,
        project_id: ProjectId,
        filter: TaskFilter,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .into_boxed();
            if let Some(status) = filter.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(priority) = filter.priority {
                query = query.filter(tasks::priority.eq(priority.as_str()));
            }
            let rows = query
                .order(tasks::created_at.desc())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_owner(&self, owner_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner_id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn soft_delete_by_project(
        &self,
        project_id: ProjectId,
        deleted_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let target = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .filter(tasks::deleted_at.is_null());
            let affected = diesel::update(target)
                .set((
                    tasks::deleted_at.eq(Some(deleted_at)),
                    tasks::updated_at.eq(deleted_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(affected).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn add_dependency(
        &self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::insert_into(task_dependencies::table)
                .values((
                    task_dependencies::task_id.eq(task_id.into_inner()),
                    task_dependencies::dependency_id.eq(dependency_id.into_inner()),
                ))
                .on_conflict_do_nothing()
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn remove_dependency(
        &self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let edge = task_dependencies::table
                .filter(task_dependencies::task_id.eq(task_id.into_inner()))
                .filter(task_dependencies::dependency_id.eq(dependency_id.into_inner()));
            diesel::delete(edge)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn dependency_ids(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskId>> {
        self.run_blocking(move |connection| {
            let ids = task_dependencies::table
                .filter(task_dependencies::task_id.eq(task_id.into_inner()))
                .order(task_dependencies::created_at.asc())
                .select(task_dependencies::dependency_id)
                .load::<uuid::Uuid>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(ids.into_iter().map(TaskId::from_uuid).collect())
        })
        .await
    }
}

fn hours_to_column(hours: Hours) -> TaskRepositoryResult<i64> {
    i64::try_from(hours.hundredths()).map_err(TaskRepositoryError::persistence)
}

fn hours_from_column(hundredths: i64) -> TaskRepositoryResult<Hours> {
    u64::try_from(hundredths)
        .map(Hours::from_hundredths)
        .map_err(TaskRepositoryError::invalid_persisted_data)
}

fn tags_to_column(tags: Option<&BTreeSet<String>>) -> TaskRepositoryResult<Option<Value>> {
    tags.map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)
}

fn tags_from_column(tags: Option<Value>) -> TaskRepositoryResult<Option<BTreeSet<String>>> {
    tags.map(serde_json::from_value::<BTreeSet<String>>)
        .transpose()
        .map_err(TaskRepositoryError::invalid_persisted_data)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        start_date: task.start_date(),
        due_date: task.due_date(),
        completed_date: task.completed_date(),
        estimated_hundredths: task.estimated_hours().map(hours_to_column).transpose()?,
        actual_hundredths: hours_to_column(task.actual_hours())?,
        tags: tags_to_column(task.tags())?,
        project_id: task.project_id().into_inner(),
        owner_id: task.owner_id().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        deleted_at: task.deleted_at(),
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangeset> {
    Ok(TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        start_date: task.start_date(),
        due_date: task.due_date(),
        completed_date: task.completed_date(),
        estimated_hundredths: task.estimated_hours().map(hours_to_column).transpose()?,
        actual_hundredths: hours_to_column(task.actual_hours())?,
        tags: tags_to_column(task.tags())?,
        updated_at: task.updated_at(),
        deleted_at: task.deleted_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        start_date,
        due_date,
        completed_date,
        estimated_hundredths,
        actual_hundredths,
        tags,
        project_id,
        owner_id,
        created_at,
        updated_at,
        deleted_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::invalid_persisted_data)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::invalid_persisted_data)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        priority,
        start_date,
        due_date,
        completed_date,
        estimated_hours: estimated_hundredths.map(hours_from_column).transpose()?,
        actual_hours: hours_from_column(actual_hundredths)?,
        tags: tags_from_column(tags)?,
        project_id: ProjectId::from_uuid(project_id),
        owner_id: UserId::from_uuid(owner_id),
        created_at,
        updated_at,
        deleted_at,
    }))
}
