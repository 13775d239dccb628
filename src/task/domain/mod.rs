//! Domain model for the task graph.
//!
//! Tasks are plain records with a small status/priority vocabulary. Hours are
//! fixed-point so repeated logging never accumulates rounding drift.

mod error;
mod hours;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use hours::Hours;
pub use ids::TaskId;
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
