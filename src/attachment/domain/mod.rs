//! Domain model for attachments.

mod attachment;
mod error;
mod ids;

pub use attachment::{
    Attachment, AttachmentStatus, NewAttachment, PersistedAttachmentData, blob_path,
    stored_filename,
};
pub use error::{AttachmentDomainError, ParseAttachmentStatusError};
pub use ids::AttachmentId;
