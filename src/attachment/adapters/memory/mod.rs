//! In-memory adapters for attachment metadata.

mod attachment;

pub use attachment::InMemoryAttachmentRepository;
