//! Port for access-token verification used by protected endpoints.

use async_trait::async_trait;

use crate::domain::AccessClaims;

use super::define_port_error;

define_port_error! {
    /// Reasons a bearer token is refused.
    pub enum TokenVerificationError {
        /// Signature, audience or shape is wrong.
        Invalid { message: String } => "invalid access token: {message}",
        /// The token is past its expiry.
        Expired => "access token expired",
        /// The verifier could not reach its backing service.
        Unavailable { message: String } => "token verification unavailable: {message}",
    }
}

/// Port turning a bearer token into verified claims.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` and return its claims.
    async fn verify(&self, token: &str) -> Result<AccessClaims, TokenVerificationError>;
}
