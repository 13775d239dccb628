//! Tests for field rules and reference checks.

use std::sync::Arc;

use super::{ReferenceCheckError, ReferenceValidator, RequestValidator};
use crate::attachment::{domain::AttachmentStatus, services::UploadRequest};
use crate::comment::{
    adapters::memory::InMemoryCommentRepository,
    domain::{Comment, CommentId, NewComment},
    ports::CommentRepository,
    services::CreateCommentRequest,
};
use crate::config::ValidationLimits;
use crate::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{UserId, UserProfile},
};
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{NewProject, Project, ProjectChanges, ProjectId},
    ports::ProjectRepository,
    services::CreateProjectRequest,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Hours, NewTask, Task, TaskChanges, TaskId, TaskPriority},
    ports::TaskRepository,
    services::CreateTaskRequest,
};
use crate::test_support::SteppingClock;
use chrono::NaiveDate;
use rstest::{fixture, rstest};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[fixture]
fn validator() -> RequestValidator {
    RequestValidator::default()
}

#[rstest]
fn task_request_collects_every_violation(validator: RequestValidator) {
    let request = CreateTaskRequest::new("   ", ProjectId::new())
        .with_start_date(date(2026, 3, 10))
        .with_due_date(date(2026, 3, 1))
        .with_estimated_hours(-1.0);

    let failure = validator
        .task_request(&request)
        .expect_err("request should be rejected");

    assert_eq!(failure.errors().len(), 3);
    assert!(failure.has_field("title"));
    assert!(failure.has_field("due_date"));
    assert!(failure.has_field("estimated_hours"));
}

#[rstest]
fn task_request_accepts_same_day_schedule(validator: RequestValidator) {
    let request = CreateTaskRequest::new("Write report", ProjectId::new())
        .with_start_date(date(2026, 3, 1))
        .with_due_date(date(2026, 3, 1))
        .with_estimated_hours(0.0);

    assert!(validator.task_request(&request).is_ok());
}

#[rstest]
fn titles_are_limited_in_characters() {
    let validator = RequestValidator::new(ValidationLimits {
        max_title_chars: 5,
        ..ValidationLimits::STANDARD
    });

    assert!(
        validator
            .task_request(&CreateTaskRequest::new("héllo", ProjectId::new()))
            .is_ok()
    );
    let failure = validator
        .project_request(&CreateProjectRequest::new("héllos"))
        .expect_err("name should be too long");
    assert!(failure.has_field("name"));
}

#[rstest]
fn partial_updates_only_check_supplied_fields(validator: RequestValidator) {
    assert!(
        validator
            .task_changes(&TaskChanges::new().with_due_date(Some(date(2020, 1, 1))))
            .is_ok()
    );

    let failure = validator
        .task_changes(
            &TaskChanges::new()
                .with_title("")
                .with_start_date(Some(date(2026, 5, 2)))
                .with_due_date(Some(date(2026, 5, 1))),
        )
        .expect_err("update should be rejected");
    assert!(failure.has_field("title"));
    assert!(failure.has_field("due_date"));

    let project_failure = validator
        .project_changes(
            &ProjectChanges::new()
                .with_start_date(Some(date(2026, 5, 2)))
                .with_end_date(Some(date(2026, 5, 1))),
        )
        .expect_err("update should be rejected");
    assert!(project_failure.has_field("end_date"));
}

#[rstest]
fn project_request_checks_date_order(validator: RequestValidator) {
    let request = CreateProjectRequest::new("Launch")
        .with_start_date(date(2026, 6, 1))
        .with_end_date(date(2026, 5, 1));

    let failure = validator
        .project_request(&request)
        .expect_err("request should be rejected");

    assert_eq!(failure.errors().len(), 1);
    assert!(failure.has_field("end_date"));
}

#[rstest]
#[case("", true)]
#[case(" \n ", true)]
#[case("looks good", false)]
fn comment_content_must_not_be_blank(
    validator: RequestValidator,
    #[case] content: &str,
    #[case] rejected: bool,
) {
    assert_eq!(validator.comment_content(content).is_err(), rejected);
}

#[rstest]
fn uploads_must_be_non_empty_and_within_limit() {
    let validator = RequestValidator::new(ValidationLimits {
        max_upload_bytes: 4,
        ..ValidationLimits::STANDARD
    });
    let task_id = TaskId::new();

    assert!(
        validator
            .upload(&UploadRequest::new(b"abcd".to_vec(), "a.txt", "text/plain", task_id))
            .is_ok()
    );
    let empty = validator
        .upload(&UploadRequest::new(Vec::new(), "a.txt", "text/plain", task_id))
        .expect_err("empty upload should be rejected");
    assert!(empty.has_field("file"));
    let oversized = validator
        .upload(&UploadRequest::new(b"abcde".to_vec(), " ", "text/plain", task_id))
        .expect_err("oversized upload should be rejected");
    assert_eq!(oversized.errors().len(), 2);
}

#[rstest]
#[case("low", Some(TaskPriority::Low))]
#[case(" URGENT ", Some(TaskPriority::Urgent))]
#[case("critical", None)]
fn priorities_parse_case_insensitively(
    validator: RequestValidator,
    #[case] raw: &str,
    #[case] expected: Option<TaskPriority>,
) {
    assert_eq!(validator.priority(raw).ok(), expected);
}

#[rstest]
fn attachment_status_rejects_unknown_values(validator: RequestValidator) {
    assert_eq!(
        validator.attachment_status("approved").ok(),
        Some(AttachmentStatus::Approved)
    );
    let failure = validator
        .attachment_status("archived")
        .expect_err("status should be rejected");
    assert!(failure.has_field("status"));
}

#[rstest]
#[case(0.1, Some(10))]
#[case(2.5, Some(250))]
#[case(0.05, None)]
#[case(0.095, None)]
#[case(0.099_999, None)]
#[case(0.0, None)]
#[case(-1.0, None)]
#[case(f64::NAN, None)]
fn logged_hours_respect_minimum(
    validator: RequestValidator,
    #[case] hours: f64,
    #[case] expected: Option<u64>,
) {
    assert_eq!(
        validator.logged_hours(hours).ok().map(Hours::hundredths),
        expected
    );
}

#[rstest]
fn failure_display_lists_fields(validator: RequestValidator) {
    let failure = validator
        .task_request(&CreateTaskRequest::new("", ProjectId::new()).with_estimated_hours(-2.0))
        .expect_err("request should be rejected");

    assert_eq!(
        failure.to_string(),
        "validation failed: title: is required; estimated_hours: must be a number of at least 0"
    );
}

type TestReferences = ReferenceValidator<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    InMemoryUserDirectory,
>;

struct World {
    references: TestReferences,
    project_id: ProjectId,
    task_id: TaskId,
    comment_id: CommentId,
    user_id: UserId,
}

#[fixture]
async fn world() -> World {
    let clock = SteppingClock::new();
    let projects = Arc::new(InMemoryProjectRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let comments = Arc::new(InMemoryCommentRepository::new());
    let users = Arc::new(InMemoryUserDirectory::new());
    let user_id = UserId::new();
    users
        .insert(UserProfile::new(user_id, "Ren", "ren@example.com"))
        .expect("profile inserted");

    let project = Project::new(
        NewProject {
            name: "Roadmap".to_owned(),
            description: None,
            start_date: None,
            end_date: None,
        },
        user_id,
        &clock,
    )
    .expect("valid project");
    projects.store(&project).await.expect("project stored");
    let task = Task::new(
        NewTask {
            title: "Draft".to_owned(),
            project_id: project.id(),
            description: None,
            start_date: None,
            due_date: None,
            priority: TaskPriority::default(),
            estimated_hours: None,
            tags: None,
        },
        user_id,
        &clock,
    )
    .expect("valid task");
    tasks.store(&task).await.expect("task stored");
    let comment = Comment::new(
        NewComment {
            content: "first".to_owned(),
            task_id: task.id(),
            parent_id: None,
            mentioned_users: None,
        },
        user_id,
        &clock,
    )
    .expect("valid comment");
    comments.store(&comment).await.expect("comment stored");

    World {
        references: ReferenceValidator::new(projects, tasks, comments, users),
        project_id: project.id(),
        task_id: task.id(),
        comment_id: comment.id(),
        user_id,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn existing_references_pass(#[future] world: World) {
    let seeded = world.await;

    seeded
        .references
        .task_request(&CreateTaskRequest::new("Next", seeded.project_id))
        .await
        .expect("project exists");
    seeded
        .references
        .comment_request(
            &CreateCommentRequest::new("reply", seeded.task_id)
                .in_reply_to(seeded.comment_id)
                .with_mentions([seeded.user_id]),
        )
        .await
        .expect("references exist");
    seeded
        .references
        .upload(&UploadRequest::new(b"x".to_vec(), "x.txt", "text/plain", seeded.task_id))
        .await
        .expect("task exists");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_comment_references_are_all_reported(#[future] world: World) {
    let seeded = world.await;
    let request = CreateCommentRequest::new("reply", TaskId::new())
        .in_reply_to(CommentId::new())
        .with_mentions([seeded.user_id, UserId::new()]);

    let result = seeded.references.comment_request(&request).await;

    let failure = match result {
        Err(ReferenceCheckError::Invalid(found)) => found,
        other => panic!("expected invalid references, got {other:?}"),
    };
    assert_eq!(failure.errors().len(), 3);
    assert!(failure.has_field("task_id"));
    assert!(failure.has_field("parent_id"));
    assert!(failure.has_field("mentioned_users"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_project_and_task_are_rejected(#[future] world: World) {
    let seeded = world.await;

    assert!(matches!(
        seeded
            .references
            .task_request(&CreateTaskRequest::new("Orphan", ProjectId::new()))
            .await,
        Err(ReferenceCheckError::Invalid(failure)) if failure.has_field("project_id")
    ));
    assert!(matches!(
        seeded
            .references
            .upload(&UploadRequest::new(b"x".to_vec(), "x.txt", "text/plain", TaskId::new()))
            .await,
        Err(ReferenceCheckError::Invalid(failure)) if failure.has_field("task_id")
    ));
}
