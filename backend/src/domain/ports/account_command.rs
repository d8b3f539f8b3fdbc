//! Driving port for registration and session use-cases.
//!
//! Inbound adapters call this port without knowing which identity provider
//! backs it, so handler tests can run against an in-memory double.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, Registration, SignUpOutcome};

/// Domain use-case port for accounts.
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new account.
    async fn sign_up(&self, registration: Registration) -> Result<SignUpOutcome, Error>;

    /// Resolve the username to an email and sign in with the password.
    async fn sign_in(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), Error>;
}
