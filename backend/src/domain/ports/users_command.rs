//! Driving port for user profile mutations.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile, UserProfileUpdate};

/// Domain use-case port for editing and removing users.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Patch a profile, returning updated rows.
    async fn update_user(
        &self,
        id: &UserId,
        update: UserProfileUpdate,
    ) -> Result<Vec<UserProfile>, Error>;

    /// Delete the profile row and the identity account, returning the deleted rows.
    async fn delete_user(&self, id: &UserId) -> Result<Vec<UserProfile>, Error>;
}
