//! Diesel schema for comment persistence.

diesel::table! {
    /// Comment records.
    comments (id) {
        /// Internal comment identifier.
        id -> Uuid,
        /// Comment body.
        content -> Text,
        /// Task being discussed.
        task_id -> Uuid,
        /// Authoring user.
        author_id -> Uuid,
        /// Parent comment for replies.
        parent_id -> Nullable<Uuid>,
        /// JSON array of mentioned user identifiers.
        mentioned_users -> Nullable<Jsonb>,
        /// JSON array of prior versions.
        edit_history -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
