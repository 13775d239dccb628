//! Project record and lifecycle status.

use super::{ParseProjectStatusError, ProjectDomainError, ProjectId};
use crate::identity::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Created but not started.
    #[default]
    Pending,
    /// Work is under way.
    Active,
    /// All work is done.
    Completed,
    /// Retired from active lists.
    Archived,
}

impl ProjectStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Active, Self::Completed, Self::Archived];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseProjectStatusError(value.to_owned()))
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project grouping related tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: ProjectStatus,
    owner_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Fields supplied when creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Project name; names are not required to be unique.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned end date.
    pub end_date: Option<NaiveDate>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted start date.
    pub start_date: Option<NaiveDate>,
    /// Persisted end date.
    pub end_date: Option<NaiveDate>,
    /// Persisted status.
    pub status: ProjectStatus,
    /// Persisted owner.
    pub owner_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A partial update to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    name: Option<String>,
    description: Option<Option<String>>,
    start_date: Option<Option<NaiveDate>>,
    end_date: Option<Option<NaiveDate>>,
    status: Option<ProjectStatus>,
}

impl ProjectChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets or clears the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets or clears the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: Option<NaiveDate>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the name that would be applied, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the start date that would be applied, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<Option<NaiveDate>> {
        self.start_date
    }

    /// Returns the end date that would be applied, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<Option<NaiveDate>> {
        self.end_date
    }
}

impl Project {
    /// Creates a pending project owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the name is blank.
    pub fn new(
        new_project: NewProject,
        owner_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        let name = normalize_name(new_project.name)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name,
            description: new_project.description,
            start_date: new_project.start_date,
            end_date: new_project.end_date,
            status: ProjectStatus::Pending,
            owner_id,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            start_date: data.start_date,
            end_date: data.end_date,
            status: data.status,
            owner_id: data.owner_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the planned start date.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the planned end date.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-deletion timestamp.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns whether the project has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Merges `changes` into the project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the new name is blank
    /// and [`ProjectDomainError::EndBeforeStart`] when the resulting end date
    /// precedes the resulting start date. The project is left unchanged on
    /// error.
    pub fn apply(
        &mut self,
        changes: ProjectChanges,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        let ProjectChanges {
            name,
            description,
            start_date,
            end_date,
            status,
        } = changes;

        let normalized_name = name.map(normalize_name).transpose()?;
        if let (Some(start), Some(end)) = (
            start_date.unwrap_or(self.start_date),
            end_date.unwrap_or(self.end_date),
        ) {
            if end < start {
                return Err(ProjectDomainError::EndBeforeStart { start, end });
            }
        }

        if let Some(new_name) = normalized_name {
            self.name = new_name;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = start_date {
            self.start_date = value;
        }
        if let Some(value) = end_date {
            self.end_date = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        self.touch(clock);
        Ok(())
    }

    /// Moves the project to [`ProjectStatus::Archived`].
    pub fn archive(&mut self, clock: &impl Clock) {
        self.status = ProjectStatus::Archived;
        self.touch(clock);
    }

    /// Marks the project as soft-deleted.
    pub fn soft_delete(&mut self, clock: &impl Clock) {
        let now = clock.utc();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_name(name: String) -> Result<String, ProjectDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProjectDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}
