//! Identity domain types.

use crate::ids::uuid_id;
use serde::{Deserialize, Serialize};

uuid_id!(
    /// Unique identifier for a user known to the identity provider.
    UserId
);

/// The authenticated user on whose behalf an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    user_id: UserId,
}

impl Actor {
    /// Creates an actor context for the given user.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        self.user_id
    }
}

impl From<UserId> for Actor {
    fn from(user_id: UserId) -> Self {
        Self::new(user_id)
    }
}

/// Public profile of a user, attached to entities in detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
}

impl UserProfile {
    /// Creates a profile.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
