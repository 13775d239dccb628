//! Diesel schema for project persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Internal project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Planned start date.
        start_date -> Nullable<Date>,
        /// Planned end date.
        end_date -> Nullable<Date>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
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
