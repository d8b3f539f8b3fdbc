//! Port for the managed identity provider.

use async_trait::async_trait;

use crate::domain::{AuthSession, IdentityUser, Registration, SignUpOutcome, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider could not be reached.
        Connection { message: String } => "identity provider connection failed: {message}",
        /// Email and password did not match an account.
        InvalidCredentials => "invalid login credentials",
        /// The access token was missing, expired or revoked.
        InvalidToken { message: String } => "access token rejected: {message}",
        /// The provider refused the request.
        Rejected { message: String } => "identity provider rejected the request: {message}",
    }
}

/// Port for sign-up, sign-in and account administration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account.
    async fn sign_up(
        &self,
        registration: &Registration,
    ) -> Result<SignUpOutcome, IdentityProviderError>;

    /// Exchange email and password for a session.
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, IdentityProviderError>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityProviderError>;

    /// Resolve the account behind `access_token`.
    async fn fetch_user(&self, access_token: &str) -> Result<IdentityUser, IdentityProviderError>;

    /// Remove an account using administrative credentials.
    async fn admin_delete_user(&self, id: &UserId) -> Result<(), IdentityProviderError>;
}
