//! Port for the users profile table.

use async_trait::async_trait;

use crate::domain::{UserId, UserProfile, UserProfileUpdate};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// The store rejected the request or returned an unreadable body.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Port for the profile rows the identity provider mirrors into the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// The profile with `id`, if any.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserRepositoryError>;

    /// Email registered for `username`, if the username exists.
    async fn find_email_by_username(
        &self,
        username: &str,
    ) -> Result<Option<String>, UserRepositoryError>;

    /// Every profile row.
    async fn list_all(&self) -> Result<Vec<UserProfile>, UserRepositoryError>;

    /// Patch the profile with `id`, returning the updated rows.
    async fn update(
        &self,
        id: &UserId,
        update: &UserProfileUpdate,
    ) -> Result<Vec<UserProfile>, UserRepositoryError>;

    /// Delete the profile with `id`, returning the deleted rows.
    async fn delete(&self, id: &UserId) -> Result<Vec<UserProfile>, UserRepositoryError>;
}
