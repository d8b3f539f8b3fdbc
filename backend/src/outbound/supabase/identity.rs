//! Identity-provider adapter: sign-up, password sign-in, sign-out, token
//! introspection and administrative user deletion.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::client::{ApiKey, SupabaseClient, SupabaseError};
use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, TokenVerificationError, TokenVerifier,
};
use crate::domain::{
    AccessClaims, AuthSession, IdentityUser, Registration, SignUpOutcome, UserId,
};

#[derive(Debug, Deserialize)]
struct UserDto {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    user_metadata: Value,
}

impl UserDto {
    fn into_domain(self) -> Result<IdentityUser, IdentityProviderError> {
        let id = UserId::new(&self.id).map_err(|err| {
            IdentityProviderError::rejected(format!("provider returned invalid user id: {err}"))
        })?;
        Ok(IdentityUser {
            id,
            email: self.email,
            user_metadata: self.user_metadata,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SessionDto {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    refresh_token: Option<String>,
    user: UserDto,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

impl SessionDto {
    fn into_domain(self) -> Result<AuthSession, IdentityProviderError> {
        Ok(AuthSession {
            access_token: self.access_token,
            token_type: self.token_type,
            expires_in: self.expires_in,
            refresh_token: self.refresh_token,
            user: self.user.into_domain()?,
        })
    }
}

/// Sign-up answers with a session when confirmation is disabled, otherwise
/// with the bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponseDto {
    Session(SessionDto),
    User(UserDto),
}

#[derive(Debug, Serialize)]
struct SignUpMetadata<'a> {
    full_name: &'a str,
    username: &'a str,
    #[serde(rename = "userType")]
    user_type: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

impl<'a> From<&'a Registration> for SignUpBody<'a> {
    fn from(value: &'a Registration) -> Self {
        Self {
            email: value.email(),
            password: value.password(),
            data: SignUpMetadata {
                full_name: value.full_name(),
                username: value.username(),
                user_type: value.user_type(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct PasswordGrantBody<'a> {
    email: &'a str,
    password: &'a str,
}

fn map_identity_error(error: SupabaseError) -> IdentityProviderError {
    if error.is_connection() {
        IdentityProviderError::connection(error.to_string())
    } else {
        IdentityProviderError::rejected(error.to_string())
    }
}

fn map_sign_in_error(error: SupabaseError) -> IdentityProviderError {
    match error.status() {
        Some(StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) => {
            IdentityProviderError::invalid_credentials()
        }
        _ => map_identity_error(error),
    }
}

fn map_token_error(error: SupabaseError) -> IdentityProviderError {
    match error.status() {
        Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
            IdentityProviderError::invalid_token(error.to_string())
        }
        _ => map_identity_error(error),
    }
}

fn claims_from_user(user: UserDto) -> AccessClaims {
    let mut extra = Map::new();
    if !user.user_metadata.is_null() {
        extra.insert("user_metadata".to_owned(), user.user_metadata);
    }
    AccessClaims {
        sub: user.id,
        exp: None,
        email: user.email,
        role: user.role,
        extra,
    }
}

/// Identity provider backed by the managed auth service.
///
/// Also verifies bearer tokens remotely by resolving the user behind them,
/// which is used when no signing secret is configured.
#[derive(Clone)]
pub struct SupabaseIdentityProvider {
    client: SupabaseClient,
}

impl SupabaseIdentityProvider {
    /// Create the adapter.
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn auth_url(&self, path: &[&str]) -> reqwest::Url {
        let mut segments: Vec<&str> = vec!["auth", "v1"];
        segments.extend_from_slice(path);
        self.client.endpoint(segments)
    }

    async fn fetch_user_dto(&self, access_token: &str) -> Result<UserDto, IdentityProviderError> {
        let request = self
            .client
            .user_request(Method::GET, self.auth_url(&["user"]), access_token);
        self.client
            .send_json(request)
            .await
            .map_err(map_token_error)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn sign_up(
        &self,
        registration: &Registration,
    ) -> Result<SignUpOutcome, IdentityProviderError> {
        let request = self
            .client
            .request(Method::POST, self.auth_url(&["signup"]), ApiKey::Anon)
            .json(&SignUpBody::from(registration));
        let response: SignUpResponseDto = self
            .client
            .send_json(request)
            .await
            .map_err(map_identity_error)?;
        match response {
            SignUpResponseDto::Session(session) => {
                let session = session.into_domain()?;
                Ok(SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                })
            }
            SignUpResponseDto::User(user) => Ok(SignUpOutcome {
                user: user.into_domain()?,
                session: None,
            }),
        }
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, IdentityProviderError> {
        let request = self
            .client
            .request(Method::POST, self.auth_url(&["token"]), ApiKey::Anon)
            .query(&[("grant_type", "password")])
            .json(&PasswordGrantBody { email, password });
        let session: SessionDto = self
            .client
            .send_json(request)
            .await
            .map_err(map_sign_in_error)?;
        session.into_domain()
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityProviderError> {
        let request =
            self.client
                .user_request(Method::POST, self.auth_url(&["logout"]), access_token);
        self.client
            .send(request)
            .await
            .map(|_| ())
            .map_err(map_token_error)
    }

    async fn fetch_user(&self, access_token: &str) -> Result<IdentityUser, IdentityProviderError> {
        self.fetch_user_dto(access_token).await?.into_domain()
    }

    async fn admin_delete_user(&self, id: &UserId) -> Result<(), IdentityProviderError> {
        let id = id.to_string();
        let request = self.client.request(
            Method::DELETE,
            self.auth_url(&["admin", "users", id.as_str()]),
            ApiKey::ServiceRole,
        );
        self.client
            .send(request)
            .await
            .map(|_| ())
            .map_err(map_identity_error)
    }
}

#[async_trait]
impl TokenVerifier for SupabaseIdentityProvider {
    async fn verify(&self, token: &str) -> Result<AccessClaims, TokenVerificationError> {
        match self.fetch_user_dto(token).await {
            Ok(user) => Ok(claims_from_user(user)),
            Err(IdentityProviderError::Connection { message }) => {
                Err(TokenVerificationError::unavailable(message))
            }
            Err(other) => Err(TokenVerificationError::invalid(other.to_string())),
        }
    }
}
