//! Diesel schema for the user directory.

diesel::table! {
    /// User accounts owned by the identity provider.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Contact email address.
        #[max_length = 255]
        email -> Varchar,
    }
}
