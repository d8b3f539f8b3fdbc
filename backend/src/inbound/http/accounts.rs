//! Account handlers: registration, sign-in, sign-out and the token probe.
//!
//! ```text
//! POST /create_user {"firstName":"Ada",...,"password":"s","confirmPassword":"s"}
//! POST /sign_in {"username":"ada","password":"s"}
//! GET /sign_out   (optional Authorization: Bearer <token>)
//! GET /protected  (Authorization: Bearer <token>)
//! ```

use actix_web::{HttpRequest, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    AccessClaims, AuthSession, Error, IdentityUser, LoginCredentials, Registration,
    RegistrationDraft, SignUpOutcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AuthenticatedUser, bearer_token};
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_credentials_error;

/// Registration body for `POST /create_user`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub user_type: String,
}

impl CreateUserRequest {
    fn to_registration(&self) -> Result<Registration, Error> {
        Registration::try_new(RegistrationDraft {
            first_name: &self.first_name,
            last_name: &self.last_name,
            username: &self.username,
            email: &self.email,
            password: &self.password,
            confirm_password: &self.confirm_password,
            user_type: &self.user_type,
        })
        .map_err(map_credentials_error)
    }
}

/// Sign-in body for `POST /sign_in`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<SignInRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password).map_err(map_credentials_error)
    }
}

/// Account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub email: Option<String>,
    #[schema(value_type = Object)]
    pub user_metadata: Value,
}

impl From<IdentityUser> for AccountResponse {
    fn from(value: IdentityUser) -> Self {
        Self {
            id: value.id.to_string(),
            email: value.email,
            user_metadata: value.user_metadata,
        }
    }
}

/// Session issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub user: AccountResponse,
}

impl From<AuthSession> for SessionResponse {
    fn from(value: AuthSession) -> Self {
        Self {
            access_token: value.access_token,
            token_type: value.token_type,
            expires_in: value.expires_in,
            refresh_token: value.refresh_token,
            user: value.user.into(),
        }
    }
}

/// Result of registration; `session` is null until the email is confirmed
/// when the provider requires confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SignUpResponse {
    pub user: AccountResponse,
    pub session: Option<SessionResponse>,
}

impl From<SignUpOutcome> for SignUpResponse {
    fn from(value: SignUpOutcome) -> Self {
        Self {
            user: value.user.into(),
            session: value.session.map(SessionResponse::from),
        }
    }
}

/// Greeting returned by the token probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProtectedResponse {
    #[schema(example = "Welcome, user 3fa85f64-5717-4562-b3fc-2c963f66afa6!")]
    pub message: String,
    /// Verified token claims.
    #[schema(value_type = Object)]
    pub payload: AccessClaims,
}

/// Register a new account with the identity provider.
#[utoipa::path(
    post,
    path = "/create_user",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Account created", body = SignUpResponse),
        (status = 400, description = "Invalid registration", body = ErrorSchema),
        (status = 500, description = "Identity provider failure", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "createUser",
    security([])
)]
#[post("/create_user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<SignUpResponse>> {
    let registration = payload.to_registration()?;
    let outcome = state.accounts.sign_up(registration).await?;
    Ok(web::Json(outcome.into()))
}

/// Sign in with a username and password.
#[utoipa::path(
    post,
    path = "/sign_in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Session issued", body = SessionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid login credentials", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Identity provider failure", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signIn",
    security([])
)]
#[post("/sign_in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let session = state.accounts.sign_in(credentials).await?;
    Ok(web::Json(session.into()))
}

/// Revoke the caller's session, if one is presented.
#[utoipa::path(
    get,
    path = "/sign_out",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse),
        (status = 401, description = "Malformed or rejected bearer token", body = ErrorSchema),
        (status = 500, description = "Identity provider failure", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signOut"
)]
#[get("/sign_out")]
pub async fn sign_out(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<MessageResponse>> {
    let token = bearer_token(&req)
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    if let Some(token) = token {
        state.accounts.sign_out(&token).await?;
    }
    Ok(web::Json(MessageResponse::new("Signed out")))
}

/// Echo the verified claims of the caller's token.
#[utoipa::path(
    get,
    path = "/protected",
    responses(
        (status = 200, description = "Token accepted", body = ProtectedResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "protected",
    security(("bearer" = []))
)]
#[get("/protected")]
pub async fn protected(caller: AuthenticatedUser) -> web::Json<ProtectedResponse> {
    let payload = caller.claims().clone();
    web::Json(ProtectedResponse {
        message: format!("Welcome, user {}!", payload.sub),
        payload,
    })
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
