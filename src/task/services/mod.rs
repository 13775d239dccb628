//! Application services for the task graph.

mod graph;

pub use graph::{
    CreateTaskRequest, TaskDetails, TaskGraphService, TaskServiceError, TaskServiceResult,
};
