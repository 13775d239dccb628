//! Identifier types for the project domain.

use crate::ids::uuid_id;

uuid_id!(
    /// Unique identifier for a project record.
    ProjectId
);
