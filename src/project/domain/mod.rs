//! Domain model for projects.

mod error;
mod ids;
mod metrics;
mod project;

pub use error::{ParseProjectStatusError, ProjectDomainError};
pub use ids::ProjectId;
pub use metrics::ProjectMetrics;
pub use project::{NewProject, PersistedProjectData, Project, ProjectChanges, ProjectStatus};
