//! Registration and session service.
//!
//! Sign-in is keyed by username, so the service resolves the account email
//! from the users table before asking the identity provider to check the
//! password.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AccountCommand, IdentityProvider, IdentityProviderError, UserRepository, UserRepositoryError,
};
use crate::domain::{AuthSession, Error, LoginCredentials, Registration, SignUpOutcome};

fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidCredentials => {
            Error::unauthorized("Invalid login credentials")
        }
        IdentityProviderError::InvalidToken { message } => Error::unauthorized(message),
        other => Error::upstream(other.to_string()),
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    Error::upstream(error.to_string())
}

/// Service implementing [`AccountCommand`].
#[derive(Clone)]
pub struct AccountService<U, I> {
    users: Arc<U>,
    identity: Arc<I>,
}

impl<U, I> AccountService<U, I> {
    /// Create the service.
    pub fn new(users: Arc<U>, identity: Arc<I>) -> Self {
        Self { users, identity }
    }
}

#[async_trait]
impl<U, I> AccountCommand for AccountService<U, I>
where
    U: UserRepository,
    I: IdentityProvider,
{
    async fn sign_up(&self, registration: Registration) -> Result<SignUpOutcome, Error> {
        let outcome = self
            .identity
            .sign_up(&registration)
            .await
            .map_err(map_identity_error)?;
        info!(
            user_id = %outcome.user.id,
            confirmed = outcome.session.is_some(),
            "account registered"
        );
        Ok(outcome)
    }

    async fn sign_in(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let email = self
            .users
            .find_email_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;
        self.identity
            .sign_in(&email, credentials.password())
            .await
            .map_err(map_identity_error)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), Error> {
        self.identity
            .sign_out(access_token)
            .await
            .map_err(map_identity_error)
    }
}
