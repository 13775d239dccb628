//! Diesel schema for attachment persistence.

diesel::table! {
    /// Attachment metadata records.
    attachments (id) {
        /// Internal attachment identifier.
        id -> Uuid,
        /// Stored filename.
        filename -> Text,
        /// Client-supplied filename.
        #[max_length = 255]
        original_filename -> Varchar,
        /// Blob path relative to the store root.
        file_path -> Text,
        /// MIME type.
        #[max_length = 255]
        mime_type -> Varchar,
        /// Size in bytes.
        file_size -> Int8,
        /// Owning task.
        task_id -> Uuid,
        /// Uploading user.
        uploader_id -> Uuid,
        /// Review status.
        #[max_length = 20]
        status -> Varchar,
        /// Version per task and original filename.
        version -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}
