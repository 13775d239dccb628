//! Attachment flows: validated uploads, versioning and blob cleanup.

use atelier::attachment::{
    domain::AttachmentStatus,
    services::{AttachmentServiceError, UploadRequest},
};
use atelier::project::services::CreateProjectRequest;
use atelier::task::services::CreateTaskRequest;
use atelier::validation::ReferenceCheckError;
use camino::Utf8Path;
use rstest::rstest;

use super::helpers::{Tracker, tracker};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reuploads_version_per_task_and_filename(tracker: Tracker) -> Result<(), eyre::Report> {
    let owner = tracker.register("Vera")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Brand"))
        .await?;
    let task = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Logo", project.id()))
        .await?;

    let mut versions = Vec::new();
    for body in ["draft", "revised", "final"] {
        let request = UploadRequest::new(body.as_bytes().to_vec(), "logo.svg", "image/svg+xml", task.id());
        tracker.rules.upload(&request)?;
        tracker.references.upload(&request).await?;
        versions.push(tracker.attachments.upload(&owner, request).await?);
    }

    eyre::ensure!(
        versions.iter().map(|attachment| attachment.version()).eq([1, 2, 3]),
        "versions were not sequential"
    );
    let listed = tracker.attachments.list_by_task(task.id()).await?;
    eyre::ensure!(
        listed
            .iter()
            .map(|attachment| attachment.version())
            .eq([3, 2, 1]),
        "listing should be newest first"
    );
    eyre::ensure!(tracker.blobs.len()? == 3, "each version keeps its own blob");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uploads_to_missing_tasks_are_rejected(tracker: Tracker) -> Result<(), eyre::Report> {
    let request = UploadRequest::new(
        b"orphan".to_vec(),
        "orphan.txt",
        "text/plain",
        atelier::task::domain::TaskId::new(),
    );

    let result = tracker.references.upload(&request).await;

    eyre::ensure!(
        matches!(&result, Err(ReferenceCheckError::Invalid(failure)) if failure.has_field("task_id")),
        "expected missing task, got {result:?}"
    );
    eyre::ensure!(tracker.blobs.is_empty()?, "nothing should be stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_then_delete_removes_blob(tracker: Tracker) -> Result<(), eyre::Report> {
    let owner = tracker.register("Wim")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Legal"))
        .await?;
    let task = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Contract", project.id()))
        .await?;
    let attachment = tracker
        .attachments
        .upload(
            &owner,
            UploadRequest::new(b"%PDF".to_vec(), "contract.pdf", "application/pdf", task.id()),
        )
        .await?;

    let reviewed = tracker
        .attachments
        .update_status(attachment.id(), AttachmentStatus::Approved)
        .await?;
    eyre::ensure!(reviewed.status() == AttachmentStatus::Approved, "status not set");
    eyre::ensure!(
        tracker.attachments.read_content(attachment.id()).await? == b"%PDF",
        "content mismatch"
    );

    tracker.attachments.delete(attachment.id()).await?;

    eyre::ensure!(
        !tracker.blobs.contains(Utf8Path::new(attachment.file_path()))?,
        "blob should be removed"
    );
    eyre::ensure!(
        matches!(
            tracker.attachments.read_content(attachment.id()).await,
            Err(AttachmentServiceError::NotFound(_))
        ),
        "deleted attachment still readable"
    );
    let details = tracker
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(details.attachments.is_empty(), "deleted attachment listed");
    Ok(())
}
