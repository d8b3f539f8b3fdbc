//! Local HS256 verification of identity-provider access tokens.
//!
//! Used when the project's JWT signing secret is configured; avoids a round
//! trip to the identity provider on every protected request.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::domain::AccessClaims;
use crate::domain::ports::{TokenVerificationError, TokenVerifier};

/// Audience the identity provider stamps on user access tokens.
pub const DEFAULT_JWT_AUDIENCE: &str = "authenticated";

const LEEWAY_SECONDS: u64 = 30;

/// Token verifier checking signature, expiry and audience locally.
#[derive(Clone)]
pub struct JwtTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Build a verifier for tokens signed with `secret` for `audience`.
    pub fn new(secret: &[u8], audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECONDS;
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl std::fmt::Debug for JwtTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenVerifier")
            .field("audience", &self.validation.aud)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AccessClaims, TokenVerificationError> {
        decode::<AccessClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenVerificationError::expired(),
                _ => TokenVerificationError::invalid(err.to_string()),
            })
    }
}
