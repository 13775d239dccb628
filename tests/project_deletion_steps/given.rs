//! Given steps for project deletion BDD scenarios.

use super::world::{ProjectWorld, run_async};
use atelier::project::services::CreateProjectRequest;
use atelier::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a project with {count:usize} tasks")]
fn project_with_tasks(world: &mut ProjectWorld, count: usize) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .projects
            .create(&world.owner, CreateProjectRequest::new("Quarterly plan")),
    )
    .wrap_err("create scenario project")?;
    for index in 0..count {
        let request = CreateTaskRequest::new(format!("Step {index}"), project.id());
        let task = run_async(world.tasks.create(&world.owner, request))
            .wrap_err("create scenario task")?;
        world.seeded_tasks.push(task);
    }
    world.project_id = Some(project.id());
    Ok(())
}
