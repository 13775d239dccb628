//! Application services for project aggregation.

mod aggregator;

pub use aggregator::{
    CreateProjectRequest, ProjectAggregatorService, ProjectOverview, ProjectServiceError,
    ProjectServiceResult,
};
