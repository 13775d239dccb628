//! When steps for project deletion BDD scenarios.

use super::world::{ProjectWorld, run_async};
use atelier::project::domain::ProjectId;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the project is deleted")]
fn project_deleted(world: &mut ProjectWorld) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    run_async(world.projects.delete(project_id)).wrap_err("delete scenario project")?;
    Ok(())
}

#[when("{count:usize} of its tasks are completed")]
fn tasks_completed(world: &mut ProjectWorld, count: usize) -> Result<(), eyre::Report> {
    eyre::ensure!(
        count <= world.seeded_tasks.len(),
        "only {} tasks were seeded",
        world.seeded_tasks.len()
    );
    for task in world.seeded_tasks.iter().take(count) {
        run_async(world.tasks.complete(task.id())).wrap_err("complete scenario task")?;
    }
    Ok(())
}

#[when("metrics are requested for an unknown project")]
fn metrics_for_unknown(world: &mut ProjectWorld) {
    world.last_metrics = Some(run_async(world.projects.metrics(ProjectId::new())));
}
