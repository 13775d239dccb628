//! Application services for comment threads.

mod thread;

pub use thread::{
    CommentServiceError, CommentServiceResult, CommentThread, CommentThreadService,
    CreateCommentRequest, ThreadReply,
};
