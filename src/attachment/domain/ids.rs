//! Identifier types for the attachment domain.

use crate::ids::uuid_id;

uuid_id!(
    /// Unique identifier for an attachment record.
    AttachmentId
);
