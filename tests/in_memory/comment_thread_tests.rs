//! Comment thread flows checked against the reference validator.

use std::collections::BTreeSet;

use atelier::comment::services::{CommentServiceError, CreateCommentRequest};
use atelier::identity::domain::{Actor, UserId};
use atelier::project::services::CreateProjectRequest;
use atelier::task::{domain::TaskId, services::CreateTaskRequest};
use atelier::validation::ReferenceCheckError;
use rstest::rstest;

use super::helpers::{Tracker, tracker};

async fn seed_task(tracker: &Tracker) -> Result<(Actor, TaskId), eyre::Report> {
    let owner = tracker.register("Sol")?;
    let project = tracker
        .projects
        .create(&owner, CreateProjectRequest::new("Docs"))
        .await?;
    let task = tracker
        .tasks
        .create(&owner, CreateTaskRequest::new("Review", project.id()))
        .await?;
    Ok((owner, task.id()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validated_replies_form_a_thread(tracker: Tracker) -> Result<(), eyre::Report> {
    let (owner, task_id) = seed_task(&tracker).await?;
    let reviewer = tracker.register("Tove")?;

    let opening = CreateCommentRequest::new("Please review", task_id)
        .with_mentions([reviewer.user_id()]);
    tracker.references.comment_request(&opening).await?;
    let root = tracker.comments.create(&owner, opening).await?;

    let reply = CreateCommentRequest::new("On it", task_id).in_reply_to(root.id());
    tracker.references.comment_request(&reply).await?;
    tracker.comments.create(&reviewer, reply).await?;

    let threads = tracker.comments.list_by_task(task_id).await?;
    let [thread] = threads.as_slice() else {
        eyre::bail!("expected one thread, found {}", threads.len());
    };
    eyre::ensure!(thread.comment.id() == root.id(), "wrong thread root");
    eyre::ensure!(
        thread
            .replies
            .iter()
            .filter_map(|entry| entry.author.as_ref())
            .map(|author| author.name.as_str())
            .eq(["Tove"]),
        "reply author missing"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_mentions_are_rejected_before_posting(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let (_, task_id) = seed_task(&tracker).await?;
    let request = CreateCommentRequest::new("cc someone", task_id).with_mentions([UserId::new()]);

    let result = tracker.references.comment_request(&request).await;

    eyre::ensure!(
        matches!(&result, Err(ReferenceCheckError::Invalid(failure)) if failure.has_field("mentioned_users")),
        "expected mention failure, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_keep_history_and_deletes_are_permanent(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let (owner, task_id) = seed_task(&tracker).await?;
    let editor = tracker.register("Uri")?;
    let comment = tracker
        .comments
        .create(&owner, CreateCommentRequest::new("first draft", task_id))
        .await?;

    let mentions: BTreeSet<UserId> = [editor.user_id()].into_iter().collect();
    let edited = tracker
        .comments
        .update(&editor, comment.id(), "second draft", Some(mentions.clone()))
        .await?;

    eyre::ensure!(edited.content() == "second draft", "content not replaced");
    eyre::ensure!(edited.mentioned_users() == Some(&mentions), "mentions not replaced");
    let [record] = edited.edit_history() else {
        eyre::bail!("expected one edit record");
    };
    eyre::ensure!(record.previous_content == "first draft", "history lost old body");
    eyre::ensure!(record.edited_by == editor.user_id(), "editor not recorded");

    tracker.comments.delete(comment.id()).await?;
    let result = tracker.comments.delete(comment.id()).await;
    eyre::ensure!(
        matches!(result, Err(CommentServiceError::NotFound(_))),
        "second delete should fail"
    );
    Ok(())
}
