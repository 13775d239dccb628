//! Then steps for project deletion BDD scenarios.

use super::world::{ProjectWorld, run_async};
use atelier::project::services::ProjectServiceError;
use rstest_bdd_macros::then;

#[then("the project is no longer found")]
fn project_not_found(world: &ProjectWorld) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    eyre::ensure!(
        run_async(world.projects.find_by_id(project_id))?.is_none(),
        "deleted project is still visible"
    );
    eyre::ensure!(
        run_async(world.projects.list_all())?.is_empty(),
        "deleted project is still listed"
    );
    Ok(())
}

#[then("none of its tasks are found")]
fn tasks_not_found(world: &ProjectWorld) -> Result<(), eyre::Report> {
    for task in &world.seeded_tasks {
        eyre::ensure!(
            run_async(world.tasks.find_by_id(task.id()))?.is_none(),
            "task {} survived the cascade",
            task.id()
        );
    }
    Ok(())
}

#[then("the project completion is {percentage:u64} percent")]
fn completion_is(world: &ProjectWorld, percentage: u64) -> Result<(), eyre::Report> {
    let metrics = run_async(world.projects.metrics(world.project_id()?))?;
    eyre::ensure!(
        metrics.completion_percentage == percentage,
        "expected {percentage}%, found {}%",
        metrics.completion_percentage
    );
    Ok(())
}

#[then("the request fails with project not found")]
fn request_fails_not_found(world: &ProjectWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_metrics
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing metrics result"))?;
    eyre::ensure!(
        matches!(result, Err(ProjectServiceError::NotFound(_))),
        "expected not found, got {result:?}"
    );
    Ok(())
}
