//! Blob store adapters.

mod dir;
mod memory;

pub use dir::DirBlobStore;
pub use memory::InMemoryBlobStore;
