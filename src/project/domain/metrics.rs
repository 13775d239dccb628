//! Completion metrics computed over a project's tasks.

use crate::task::domain::TaskStatus;
use serde::{Deserialize, Serialize};

/// Task counts per status and the rounded completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectMetrics {
    /// Number of live tasks.
    pub total_tasks: u64,
    /// Tasks in [`TaskStatus::Completed`].
    pub completed_tasks: u64,
    /// Tasks in [`TaskStatus::InProgress`].
    pub in_progress_tasks: u64,
    /// Tasks in [`TaskStatus::Pending`].
    pub pending_tasks: u64,
    /// Tasks in [`TaskStatus::Blocked`].
    pub blocked_tasks: u64,
    /// `completed / total * 100`, rounded half-up; zero for an empty project.
    pub completion_percentage: u64,
}

impl ProjectMetrics {
    /// Tallies the given task statuses.
    #[must_use]
    pub fn from_statuses(statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        let mut metrics = Self::default();
        for status in statuses {
            metrics.total_tasks = metrics.total_tasks.saturating_add(1);
            let bucket = match status {
                TaskStatus::Completed => &mut metrics.completed_tasks,
                TaskStatus::InProgress => &mut metrics.in_progress_tasks,
                TaskStatus::Pending => &mut metrics.pending_tasks,
                TaskStatus::Blocked => &mut metrics.blocked_tasks,
            };
            *bucket = bucket.saturating_add(1);
        }
        metrics.completion_percentage =
            completion_percentage(metrics.completed_tasks, metrics.total_tasks);
        metrics
    }
}

/// Rounds `completed / total * 100` half-up using integer arithmetic.
fn completion_percentage(completed: u64, total: u64) -> u64 {
    let numerator = completed.saturating_mul(200).saturating_add(total);
    numerator
        .checked_div(total.saturating_mul(2))
        .unwrap_or_default()
}
