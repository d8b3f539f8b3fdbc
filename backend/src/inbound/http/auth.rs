//! Bearer-token authentication for protected routes.
//!
//! [`AuthenticatedUser`] is an Actix extractor: adding it to a handler's
//! arguments rejects the request with `401 Unauthorized` before the handler
//! body runs unless `Authorization: Bearer <token>` carries a token the
//! configured [`TokenVerifier`](crate::domain::ports::TokenVerifier) accepts.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::ports::TokenVerificationError;
use crate::domain::{AccessClaims, Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "Bearer";

/// Why a request failed to present a usable bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum BearerError {
    #[error("missing bearer token")]
    Missing,
    #[error("malformed authorization header")]
    Malformed,
}

/// Extract the bearer token from the `Authorization` header.
///
/// Returns `Ok(None)` when the header is absent so callers can decide whether
/// authentication is optional.
pub(crate) fn bearer_token(req: &HttpRequest) -> Result<Option<String>, BearerError> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header.to_str().map_err(|_| BearerError::Malformed)?;
    let (scheme, token) = value.split_once(' ').ok_or(BearerError::Malformed)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(BearerError::Malformed);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::Malformed);
    }
    Ok(Some(token.to_owned()))
}

fn map_bearer_error(err: BearerError) -> Error {
    Error::unauthorized(err.to_string())
}

fn map_verification_error(err: TokenVerificationError) -> Error {
    match err {
        TokenVerificationError::Expired => Error::unauthorized("access token expired"),
        TokenVerificationError::Invalid { message } => {
            debug!(%message, "bearer token rejected");
            Error::unauthorized("invalid access token")
        }
        TokenVerificationError::Unavailable { message } => {
            warn!(%message, "token verification unavailable");
            Error::unauthorized("unable to verify access token")
        }
    }
}

/// Caller identity established from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    token: String,
    claims: AccessClaims,
}

impl AuthenticatedUser {
    /// Verified claims carried by the token.
    pub fn claims(&self) -> &AccessClaims {
        &self.claims
    }

    /// The raw access token, for forwarding to the identity provider.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Subject claim parsed as a user id.
    pub fn user_id(&self) -> Result<UserId, Error> {
        self.claims
            .user_id()
            .map_err(|err| Error::unauthorized(format!("token subject is not a user id: {err}")))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req).and_then(|token| token.ok_or(BearerError::Missing));
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token.map_err(map_bearer_error)?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let claims = state
                .token_verifier
                .verify(&token)
                .await
                .map_err(map_verification_error)?;
            Ok(Self { token, claims })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    #[given("a request with a bearer token")]
    fn a_request_with_a_bearer_token() -> HttpRequest {
        TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request()
    }

    #[given("a request using the basic scheme")]
    fn a_request_using_the_basic_scheme() -> HttpRequest {
        TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic YWRhOnNlY3JldA=="))
            .to_http_request()
    }

    #[when("the bearer token is extracted")]
    fn the_bearer_token_is_extracted(req: HttpRequest) -> Result<Option<String>, BearerError> {
        bearer_token(&req)
    }

    #[then("the token is returned")]
    fn the_token_is_returned(result: Result<Option<String>, BearerError>) {
        assert_eq!(result, Ok(Some("abc.def.ghi".to_owned())));
    }

    #[then("the header is reported as malformed")]
    fn the_header_is_reported_as_malformed(result: Result<Option<String>, BearerError>) {
        assert_eq!(result, Err(BearerError::Malformed));
    }

    #[rstest]
    fn bearer_tokens_are_extracted() {
        let req = a_request_with_a_bearer_token();
        let result = the_bearer_token_is_extracted(req);
        the_token_is_returned(result);
    }

    #[rstest]
    fn other_schemes_are_rejected() {
        let req = a_request_using_the_basic_scheme();
        let result = the_bearer_token_is_extracted(req);
        the_header_is_reported_as_malformed(result);
    }

    #[rstest]
    #[case("Bearer")]
    #[case("Bearer    ")]
    #[case("abc.def.ghi")]
    fn empty_or_schemeless_values_are_malformed(#[case] header: &str) {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, header))
            .to_http_request();
        assert_eq!(bearer_token(&req), Err(BearerError::Malformed));
    }

    #[rstest]
    #[case(BearerError::Missing, "missing bearer token")]
    #[case(BearerError::Malformed, "malformed authorization header")]
    fn bearer_errors_become_unauthorised_messages(
        #[case] err: BearerError,
        #[case] message: &str,
    ) {
        let mapped = map_bearer_error(err);
        assert_eq!(mapped.code(), ErrorCode::Unauthorized);
        assert_eq!(mapped.message(), message);
    }

    #[rstest]
    fn absent_header_is_not_an_error() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), Ok(None));
    }

    #[rstest]
    #[case(TokenVerificationError::Expired)]
    #[case(TokenVerificationError::invalid("bad signature"))]
    #[case(TokenVerificationError::unavailable("connection refused"))]
    fn verification_failures_are_unauthorised(#[case] err: TokenVerificationError) {
        assert_eq!(map_verification_error(err).code(), ErrorCode::Unauthorized);
    }
}
