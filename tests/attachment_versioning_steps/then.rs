//! Then steps for attachment versioning BDD scenarios.

use super::world::{AttachmentWorld, run_async};
use rstest_bdd_macros::then;

#[then(r#"the latest upload of "{filename}" is version {version:u32}"#)]
fn latest_version_is(
    world: &AttachmentWorld,
    filename: String,
    version: u32,
) -> Result<(), eyre::Report> {
    let latest = world
        .uploads
        .iter()
        .rev()
        .find(|attachment| attachment.original_filename() == filename)
        .ok_or_else(|| eyre::eyre!("no upload of {filename}"))?;

    eyre::ensure!(
        latest.version() == version,
        "expected version {version}, found {}",
        latest.version()
    );
    Ok(())
}

#[then("the task lists {count:usize} attachments")]
fn task_lists_attachments(world: &AttachmentWorld, count: usize) -> Result<(), eyre::Report> {
    let (_, task_id) = world.seeded()?;
    let listed = run_async(world.attachments.list_by_task(task_id))?;
    eyre::ensure!(
        listed.len() == count,
        "expected {count} attachments, found {}",
        listed.len()
    );
    Ok(())
}

#[then("the blob store holds {count:usize} blobs")]
fn blob_store_holds(world: &AttachmentWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world.blobs.len()?;
    eyre::ensure!(stored == count, "expected {count} blobs, found {stored}");
    Ok(())
}
