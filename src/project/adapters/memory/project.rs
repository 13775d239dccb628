//! In-memory repository for projects.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Project, ProjectId, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
///
/// Rows are kept in insertion order, soft-deleted rows included.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<Vec<Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(lock_error)?;
        if projects.iter().any(|existing| existing.id() == project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        projects.push(project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(lock_error)?;
        let slot = projects
            .iter_mut()
            .find(|existing| existing.id() == project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        *slot = project.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let projects = self.projects.read().map_err(lock_error)?;
        Ok(projects
            .iter()
            .find(|project| project.id() == id && !project.is_deleted())
            .cloned())
    }

    async fn list(&self, status: Option<ProjectStatus>) -> ProjectRepositoryResult<Vec<Project>> {
        let projects = self.projects.read().map_err(lock_error)?;
        let mut listed: Vec<Project> = projects
            .iter()
            .rev()
            .filter(|project| !project.is_deleted())
            .filter(|project| status.is_none_or(|wanted| project.status() == wanted))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(listed)
    }
}
