//! Authentication primitives: credentials, registrations, sessions, claims.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::Zeroizing;

use crate::domain::{UserId, UserValidationError};

/// Domain error returned when sign-in or sign-up payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Password and confirmation differ.
    PasswordMismatch,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
///
/// # Examples
/// ```
/// use recipes_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" chef ", "secret").unwrap();
/// assert_eq!(creds.username(), "chef");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used to look up the account email.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password forwarded to the identity provider.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Raw sign-up form fields before validation.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationDraft<'a> {
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Requested username.
    pub username: &'a str,
    /// Login email.
    pub email: &'a str,
    /// Chosen password.
    pub password: &'a str,
    /// Password confirmation, must equal `password`.
    pub confirm_password: &'a str,
    /// Account classification.
    pub user_type: &'a str,
}

/// Validated sign-up request forwarded to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: String,
    password: Zeroizing<String>,
    full_name: String,
    username: String,
    user_type: String,
}

impl Registration {
    /// Validate a sign-up draft.
    ///
    /// The password check runs first so a mismatch is reported even when
    /// other fields are also wrong.
    pub fn try_new(draft: RegistrationDraft<'_>) -> Result<Self, CredentialsValidationError> {
        if draft.password != draft.confirm_password {
            return Err(CredentialsValidationError::PasswordMismatch);
        }
        if draft.password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        let email = draft.email.trim();
        if email.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        let username = draft.username.trim();
        if username.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(draft.password.to_owned()),
            full_name: crate::domain::full_name(draft.first_name, draft.last_name),
            username: username.to_owned(),
            user_type: draft.user_type.trim().to_owned(),
        })
    }

    /// Login email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password to register.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// `"{first} {last}"` display name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Username stored in the user metadata.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Account classification stored in the user metadata.
    pub fn user_type(&self) -> &str {
        &self.user_type
    }
}

/// Account record returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUser {
    /// Provider-assigned identifier.
    pub id: UserId,
    /// Login email, when known.
    pub email: Option<String>,
    /// Metadata supplied at sign-up.
    #[serde(default)]
    pub user_metadata: Value,
}

/// Session issued after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Bearer token for protected endpoints.
    pub access_token: String,
    /// Token scheme, normally `bearer`.
    pub token_type: String,
    /// Lifetime of `access_token` in seconds.
    pub expires_in: Option<u64>,
    /// Token used to obtain a new access token.
    pub refresh_token: Option<String>,
    /// The signed-in account.
    pub user: IdentityUser,
}

/// Result of a sign-up call.
///
/// `session` is absent when the provider requires email confirmation first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpOutcome {
    /// The created account.
    pub user: IdentityUser,
    /// Session issued immediately, when confirmation is disabled.
    pub session: Option<AuthSession>,
}

/// Claims decoded from a verified access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the user identifier.
    pub sub: String,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    /// Email of the subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Provider role, e.g. `authenticated`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Remaining claims, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccessClaims {
    /// Parse the subject as a [`UserId`].
    pub fn user_id(&self) -> Result<UserId, UserValidationError> {
        UserId::new(&self.sub)
    }
}
