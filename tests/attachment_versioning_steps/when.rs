//! When steps for attachment versioning BDD scenarios.

use super::world::{AttachmentWorld, run_async};
use atelier::attachment::services::UploadRequest;
use eyre::WrapErr;
use rstest_bdd_macros::when;

fn upload(world: &mut AttachmentWorld, filename: &str) -> Result<(), eyre::Report> {
    let (uploader, task_id) = world.seeded()?;
    let body = format!("{filename} #{}", world.uploads.len());
    let request = UploadRequest::new(body.into_bytes(), filename, "application/octet-stream", task_id);
    let attachment = run_async(world.attachments.upload(&uploader, request))
        .wrap_err_with(|| format!("upload {filename}"))?;
    world.uploads.push(attachment);
    Ok(())
}

#[when(r#""{filename}" is uploaded {count:u32} times"#)]
fn uploaded_repeatedly(
    world: &mut AttachmentWorld,
    filename: String,
    count: u32,
) -> Result<(), eyre::Report> {
    for _ in 0..count {
        upload(world, &filename)?;
    }
    Ok(())
}

#[when(r#""{filename}" is uploaded once"#)]
fn uploaded_once(world: &mut AttachmentWorld, filename: String) -> Result<(), eyre::Report> {
    upload(world, &filename)
}

#[when("the latest upload is deleted")]
fn latest_upload_deleted(world: &mut AttachmentWorld) -> Result<(), eyre::Report> {
    let latest = world
        .uploads
        .pop()
        .ok_or_else(|| eyre::eyre!("no upload to delete"))?;
    run_async(world.attachments.delete(latest.id())).wrap_err("delete latest upload")?;
    Ok(())
}
