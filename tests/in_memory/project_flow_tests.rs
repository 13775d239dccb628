//! Project lifecycle flows across the project and task services.

use atelier::project::{
    domain::{ProjectChanges, ProjectStatus},
    services::{CreateProjectRequest, ProjectServiceError},
};
use atelier::task::{
    domain::{TaskChanges, TaskStatus},
    services::CreateTaskRequest,
};
use rstest::rstest;

use super::helpers::{Tracker, tracker};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overview_tracks_tasks_until_project_is_deleted(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let owner = tracker.register("Mara")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Website relaunch"))
        .await?;
    let design = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Design", project.id()))
        .await?;
    let build = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Build", project.id()))
        .await?;

    let overview = tracker
        .projects
        .find_by_id(project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project should exist"))?;
    let ids: Vec<_> = overview.tasks.iter().map(|task| task.id()).collect();
    eyre::ensure!(ids == vec![design.id(), build.id()], "tasks out of order");

    tracker.projects.delete(project.id()).await?;

    eyre::ensure!(
        tracker.projects.find_by_id(project.id()).await?.is_none(),
        "deleted project still visible"
    );
    eyre::ensure!(
        tracker.tasks.find_by_id(design.id()).await?.is_none()
            && tracker.tasks.find_by_id(build.id()).await?.is_none(),
        "cascaded tasks still visible"
    );
    eyre::ensure!(
        tracker.tasks.list_by_user(owner.user_id()).await?.is_empty(),
        "owner still lists cascaded tasks"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn metrics_follow_task_progress(tracker: Tracker) -> Result<(), eyre::Report> {
    let owner = tracker.register("Ines")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Migration"))
        .await?;
    let mut created = Vec::new();
    for title in ["Plan", "Copy data", "Verify"] {
        created.push(
            tracker
                .tasks
                .create(&owner, CreateTaskRequest::new(title, project.id()))
                .await?,
        );
    }
    let [plan, copy, _verify] = created.as_slice() else {
        eyre::bail!("expected three tasks");
    };
    tracker.tasks.complete(plan.id()).await?;
    tracker
        .tasks
        .update(
            copy.id(),
            TaskChanges::new().with_status(TaskStatus::InProgress),
        )
        .await?;

    let metrics = tracker.projects.metrics(project.id()).await?;

    eyre::ensure!(metrics.total_tasks == 3, "total {}", metrics.total_tasks);
    eyre::ensure!(metrics.completed_tasks == 1, "completed mismatch");
    eyre::ensure!(metrics.in_progress_tasks == 1, "in progress mismatch");
    eyre::ensure!(metrics.pending_tasks == 1, "pending mismatch");
    eyre::ensure!(
        metrics.completion_percentage == 33,
        "percentage {}",
        metrics.completion_percentage
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archived_projects_leave_the_active_listing(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let owner = tracker.register("Kai")?;
    let kept = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Kept"))
        .await?;
    let retired = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Retired"))
        .await?;
    tracker
        .projects
        .update(kept.id(), ProjectChanges::new().with_status(ProjectStatus::Active))
        .await?;
    tracker.projects.archive(retired.id()).await?;

    let active = tracker.projects.list_by_status(ProjectStatus::Active).await?;
    let archived = tracker
        .projects
        .list_by_status(ProjectStatus::Archived)
        .await?;

    eyre::ensure!(
        active.iter().map(|project| project.id()).eq([kept.id()]),
        "unexpected active projects"
    );
    eyre::ensure!(
        archived.iter().map(|project| project.id()).eq([retired.id()]),
        "unexpected archived projects"
    );
    eyre::ensure!(tracker.projects.list_all().await?.len() == 2, "listing size");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_project_cannot_be_archived(tracker: Tracker) -> Result<(), eyre::Report> {
    let owner = tracker.register("Noor")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Short-lived"))
        .await?;
    tracker.projects.delete(project.id()).await?;

    let result = tracker.projects.archive(project.id()).await;

    eyre::ensure!(
        matches!(result, Err(ProjectServiceError::NotFound(id)) if id == project.id()),
        "expected not found, got {result:?}"
    );
    Ok(())
}
