//! Diesel schema for task graph persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Planned start date.
        start_date -> Nullable<Date>,
        /// Planned due date.
        due_date -> Nullable<Date>,
        /// Completion date.
        completed_date -> Nullable<Date>,
        /// Estimated effort in hundredths of an hour.
        estimated_hundredths -> Nullable<Int8>,
        /// Logged effort in hundredths of an hour.
        actual_hundredths -> Int8,
        /// JSON array of tag strings.
        tags -> Nullable<Jsonb>,
        /// Owning project.
        project_id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Directed dependency edges between tasks.
    task_dependencies (task_id, dependency_id) {
        /// The dependent task.
        task_id -> Uuid,
        /// The prerequisite task; not constrained to exist.
        dependency_id -> Uuid,
        /// Edge insertion timestamp.
        created_at -> Timestamptz,
    }
}
