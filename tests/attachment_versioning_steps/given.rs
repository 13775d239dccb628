//! Given steps for attachment versioning BDD scenarios.

use super::world::{AttachmentWorld, run_async};
use atelier::identity::domain::{Actor, UserId, UserProfile};
use atelier::project::services::CreateProjectRequest;
use atelier::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a task with a registered uploader")]
fn task_with_uploader(world: &mut AttachmentWorld) -> Result<(), eyre::Report> {
    let uploader = Actor::new(UserId::new());
    world
        .users
        .insert(UserProfile::new(
            uploader.user_id(),
            "Yara",
            "yara@example.com",
        ))
        .wrap_err("register uploader")?;
    let project = run_async(
        world
            .projects
            .create(&uploader, CreateProjectRequest::new("Proposal")),
    )
    .wrap_err("create scenario project")?;
    let task = run_async(
        world
            .tasks
            .create(&uploader, CreateTaskRequest::new("Write proposal", project.id())),
    )
    .wrap_err("create scenario task")?;
    world.uploader = Some(uploader);
    world.task_id = Some(task.id());
    Ok(())
}
