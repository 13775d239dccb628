//! Task graph flows: dependencies, time tracking and detail views.

use atelier::attachment::services::UploadRequest;
use atelier::comment::services::CreateCommentRequest;
use atelier::project::services::CreateProjectRequest;
use atelier::task::{
    domain::{Hours, TaskPriority, TaskStatus},
    services::{CreateTaskRequest, TaskServiceError},
};
use rstest::rstest;

use super::helpers::{Tracker, tracker};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn details_gather_related_records(tracker: Tracker) -> Result<(), eyre::Report> {
    let owner = tracker.register("Lena")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Handbook"))
        .await?;
    let outline = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Outline", project.id()))
        .await?;
    let chapter = tracker
        .tasks
        .create(
            &owner,
            CreateTaskRequest::new("Chapter one", project.id())
                .with_priority(TaskPriority::High)
                .with_estimated_hours(6.5),
        )
        .await?;
    tracker
        .tasks
        .add_dependency(chapter.id(), outline.id())
        .await?;
    tracker
        .comments
        .create(&owner, CreateCommentRequest::new("Drafting now", chapter.id()))
        .await?;
    tracker
        .attachments
        .upload(
            &owner,
            UploadRequest::new(b"# One".to_vec(), "one.md", "text/markdown", chapter.id()),
        )
        .await?;

    let details = tracker
        .tasks
        .find_by_id(chapter.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;

    eyre::ensure!(
        details.task.estimated_hours() == Some(Hours::from_hundredths(650)),
        "estimate not stored"
    );
    eyre::ensure!(details.comments.len() == 1, "comment missing");
    eyre::ensure!(details.attachments.len() == 1, "attachment missing");
    eyre::ensure!(
        details.dependencies.iter().map(|task| task.id()).eq([outline.id()]),
        "dependency missing"
    );
    eyre::ensure!(
        details.owner.map(|profile| profile.name) == Some("Lena".to_owned()),
        "owner profile missing"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_prerequisites_drop_out_of_details(tracker: Tracker) -> Result<(), eyre::Report> {
    let owner = tracker.register("Omar")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Release"))
        .await?;
    let prerequisite = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Freeze", project.id()))
        .await?;
    let dependent = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Ship", project.id()))
        .await?;
    tracker
        .tasks
        .add_dependency(dependent.id(), prerequisite.id())
        .await?;
    tracker
        .tasks
        .add_dependency(dependent.id(), prerequisite.id())
        .await?;
    tracker.tasks.delete(prerequisite.id()).await?;

    let details = tracker
        .tasks
        .find_by_id(dependent.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;

    eyre::ensure!(details.dependencies.is_empty(), "deleted prerequisite shown");
    eyre::ensure!(
        tracker.tasks.dependency_ids(dependent.id()).await? == vec![prerequisite.id()],
        "edge should survive once"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_ignores_open_prerequisites(tracker: Tracker) -> Result<(), eyre::Report> {
    let owner = tracker.register("Pia")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Ops"))
        .await?;
    let blocker = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Order servers", project.id()))
        .await?;
    let install = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Install", project.id()))
        .await?;
    tracker.tasks.add_dependency(install.id(), blocker.id()).await?;

    let completed = tracker.tasks.complete(install.id()).await?;

    eyre::ensure!(completed.status() == TaskStatus::Completed, "not completed");
    eyre::ensure!(completed.completed_date().is_some(), "no completion date");
    let listed = tracker
        .tasks
        .list_by_status(project.id(), TaskStatus::Pending)
        .await?;
    eyre::ensure!(
        listed.iter().map(|task| task.id()).eq([blocker.id()]),
        "pending listing mismatch"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn logged_hours_accumulate_after_validation(tracker: Tracker) -> Result<(), eyre::Report> {
    let owner = tracker.register("Quinn")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Research"))
        .await?;
    let task = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Interviews", project.id()))
        .await?;

    for raw in [1.25, 0.5] {
        let hours = tracker.rules.logged_hours(raw)?;
        tracker.tasks.log_hours(task.id(), hours).await?;
    }
    eyre::ensure!(
        tracker.rules.logged_hours(0.01).is_err(),
        "below-minimum amount accepted"
    );

    let details = tracker
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(
        details.task.actual_hours() == Hours::from_hundredths(175),
        "total was {}",
        details.task.actual_hours()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_rejects_further_changes(tracker: Tracker) -> Result<(), eyre::Report> {
    let owner = tracker.register("Rae")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Cleanup"))
        .await?;
    let task = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Remove", project.id()))
        .await?;
    tracker.tasks.delete(task.id()).await?;

    let result = tracker
        .tasks
        .log_hours(task.id(), Hours::from_hundredths(100))
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskServiceError::NotFound(id)) if id == task.id()),
        "expected not found, got {result:?}"
    );
    eyre::ensure!(
        tracker.tasks.list_by_project(project.id()).await?.is_empty(),
        "deleted task still listed"
    );
    Ok(())
}
