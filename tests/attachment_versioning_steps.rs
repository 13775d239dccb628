//! Behaviour tests for attachment versioning.

#[path = "attachment_versioning_steps/mod.rs"]
mod attachment_versioning_steps_defs;

use attachment_versioning_steps_defs::world::{AttachmentWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/attachment_versioning.feature",
    name = "Re-uploading a file creates a new version"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reupload_creates_new_version(world: AttachmentWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/attachment_versioning.feature",
    name = "Deleted versions are never reused"
)]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_versions_are_not_reused(world: AttachmentWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/attachment_versioning.feature",
    name = "Versions are counted per file name"
)]
#[tokio::test(flavor = "multi_thread")]
async fn versions_counted_per_file_name(world: AttachmentWorld) {
    let _ = world;
}
