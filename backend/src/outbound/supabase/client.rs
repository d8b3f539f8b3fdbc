//! Shared reqwest client for the managed backend.
//!
//! Owns the base URL, the API keys and the HTTP client; adapters build their
//! requests through it so header handling and status mapping live in one
//! place.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use zeroize::Zeroizing;

/// Connection settings for the managed backend.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub base_url: Url,
    /// Public anon key used for identity calls made on behalf of users.
    pub anon_key: String,
    /// Service-role key used for table, storage and admin calls.
    pub service_role_key: Zeroizing<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Which project key authorises a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiKey {
    Anon,
    ServiceRole,
}

/// Transport-level failures shared by every adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum SupabaseError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl SupabaseError {
    /// Whether the backend could not be reached at all.
    pub(crate) fn is_connection(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// HTTP status reported by the backend, if one was received.
    pub(crate) fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }
}

/// Errors raised while building the client.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseClientError {
    /// The base URL cannot carry path segments.
    #[error("base url `{0}` cannot be used as a base")]
    InvalidBaseUrl(String),
    /// The reqwest client could not be constructed.
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

struct Inner {
    http: Client,
    base_url: Url,
    anon_key: String,
    service_role_key: Zeroizing<String>,
}

/// Cheaply cloneable handle to the managed backend.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<Inner>,
}

impl SupabaseClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is not hierarchical or the reqwest
    /// client cannot be constructed.
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseClientError> {
        if config.base_url.cannot_be_a_base() {
            return Err(SupabaseClientError::InvalidBaseUrl(
                config.base_url.to_string(),
            ));
        }
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: config.base_url,
                anon_key: config.anon_key,
                service_role_key: config.service_role_key,
            }),
        })
    }

    /// Base URL of the project.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    pub(crate) fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Start a request carrying `key` as both `apikey` and bearer token.
    pub(crate) fn request(&self, method: Method, url: Url, key: ApiKey) -> RequestBuilder {
        let secret = self.key(key);
        self.inner
            .http
            .request(method, url)
            .header("apikey", secret)
            .bearer_auth(secret)
    }

    /// Start a request authorised by a user's access token.
    pub(crate) fn user_request(
        &self,
        method: Method,
        url: Url,
        access_token: &str,
    ) -> RequestBuilder {
        self.inner
            .http
            .request(method, url)
            .header("apikey", self.inner.anon_key.as_str())
            .bearer_auth(access_token)
    }

    fn key(&self, key: ApiKey) -> &str {
        match key {
            ApiKey::Anon => self.inner.anon_key.as_str(),
            ApiKey::ServiceRole => self.inner.service_role_key.as_str(),
        }
    }

    /// Send `request` and return the body of a successful response.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, SupabaseError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    /// Send `request` and decode the JSON body.
    pub(crate) async fn send_json<T>(&self, request: RequestBuilder) -> Result<T, SupabaseError>
    where
        T: DeserializeOwned,
    {
        let body = self.send(request).await?;
        decode(&body)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, SupabaseError> {
    serde_json::from_slice(body).map_err(|err| SupabaseError::Decode(err.to_string()))
}

/// Error bodies returned by the table, storage and identity services.
#[derive(Debug, Default, Deserialize)]
struct ErrorBodyDto {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ErrorBodyDto {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
    }
}

fn map_transport_error(error: reqwest::Error) -> SupabaseError {
    if error.is_timeout() {
        SupabaseError::Timeout(error.to_string())
    } else {
        SupabaseError::Transport(error.to_string())
    }
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> SupabaseError {
    let message = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(ErrorBodyDto::into_message)
        .unwrap_or_else(|| body_preview(body));
    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        message
    };
    SupabaseError::Status {
        status: status.as_u16(),
        message,
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
pub(crate) fn test_client(base: &str) -> SupabaseClient {
    SupabaseClient::new(SupabaseConfig {
        base_url: Url::parse(base).expect("valid base url"),
        anon_key: "anon".to_owned(),
        service_role_key: Zeroizing::new("service".to_owned()),
        timeout: Duration::from_secs(5),
    })
    .expect("client builds")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network helpers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://proj.supabase.co", "https://proj.supabase.co/rest/v1/recipes")]
    #[case("https://proj.supabase.co/", "https://proj.supabase.co/rest/v1/recipes")]
    #[case("http://localhost:54321/base/", "http://localhost:54321/base/rest/v1/recipes")]
    fn endpoint_appends_segments(#[case] base: &str, #[case] expected: &str) {
        let client = test_client(base);
        assert_eq!(
            client.endpoint(["rest", "v1", "recipes"]).as_str(),
            expected
        );
    }

    #[rstest]
    fn endpoint_encodes_each_segment() {
        let client = test_client("https://proj.supabase.co");
        let url = client.endpoint(["storage", "v1", "object", "recipe-images", "Mac Cheese.jpg"]);
        assert_eq!(
            url.as_str(),
            "https://proj.supabase.co/storage/v1/object/recipe-images/Mac%20Cheese.jpg"
        );
    }

    #[rstest]
    #[case(br#"{"message":"duplicate key value"}"#.as_slice(), "duplicate key value")]
    #[case(br#"{"msg":"User already registered"}"#.as_slice(), "User already registered")]
    #[case(
        br#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#.as_slice(),
        "Invalid login credentials"
    )]
    #[case(b"  upstream   exploded ".as_slice(), "upstream exploded")]
    #[case(b"".as_slice(), "Bad Request")]
    fn status_errors_surface_the_backend_message(#[case] body: &[u8], #[case] expected: &str) {
        let error = map_status_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            error,
            SupabaseError::Status {
                status: 400,
                message: expected.to_owned()
            }
        );
        assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
        assert!(!error.is_connection());
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(400);
        let SupabaseError::Status { message, .. } =
            map_status_error(StatusCode::BAD_GATEWAY, body.as_bytes())
        else {
            panic!("expected status error");
        };
        assert_eq!(message.chars().count(), 163);
        assert!(message.ends_with("..."));
    }

    #[rstest]
    fn config_debug_hides_keys() {
        let config = SupabaseConfig {
            base_url: Url::parse("https://proj.supabase.co").expect("url"),
            anon_key: "anon-secret".into(),
            service_role_key: Zeroizing::new("service-secret".into()),
            timeout: Duration::from_secs(1),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
    }
}
