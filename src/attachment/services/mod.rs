//! Application services for attachment storage.

mod store;

pub use store::{
    AttachmentDetails, AttachmentServiceError, AttachmentServiceResult, AttachmentStoreService,
    UploadRequest,
};
