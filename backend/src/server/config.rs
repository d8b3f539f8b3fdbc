//! Start-up settings and the server configuration derived from them.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use recipes_backend::domain::RECIPE_IMAGE_BUCKET;
use recipes_backend::outbound::supabase::SupabaseConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_JWT_AUDIENCE: &str = "authenticated";

/// Settings loaded from CLI arguments, `RECIPES_*` environment variables and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Base URL of the managed backend project.
    pub supabase_url: Option<String>,
    /// Public anon key.
    pub supabase_anon_key: Option<String>,
    /// Service-role key for table, storage and admin calls.
    pub supabase_service_role_key: Option<String>,
    /// Project JWT secret; enables local token verification when set.
    pub jwt_secret: Option<String>,
    /// Expected `aud` claim of access tokens.
    pub jwt_audience: Option<String>,
    /// Storage bucket holding recipe images.
    pub image_bucket: Option<String>,
    /// Per-request timeout for outbound calls, in seconds.
    #[ortho_config(default = 10)]
    pub http_timeout_secs: u64,
}

fn required<'a>(value: Option<&'a str>, key: &str) -> std::io::Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| std::io::Error::other(format!("missing required setting {key}")))
}

impl AppSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured token audience, falling back to `authenticated`.
    pub fn jwt_audience(&self) -> &str {
        self.jwt_audience.as_deref().unwrap_or(DEFAULT_JWT_AUDIENCE)
    }

    /// Configured image bucket, falling back to `recipe-images`.
    pub fn image_bucket(&self) -> &str {
        self.image_bucket.as_deref().unwrap_or(RECIPE_IMAGE_BUCKET)
    }

    /// Configured outbound timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Connection settings for the managed backend.
    ///
    /// # Errors
    /// Returns an error naming the first missing or malformed setting.
    pub fn supabase_config(&self) -> std::io::Result<SupabaseConfig> {
        let raw_url = required(self.supabase_url.as_deref(), "RECIPES_SUPABASE_URL")?;
        let base_url = Url::parse(raw_url).map_err(|err| {
            std::io::Error::other(format!("invalid RECIPES_SUPABASE_URL `{raw_url}`: {err}"))
        })?;
        let anon_key = required(self.supabase_anon_key.as_deref(), "RECIPES_SUPABASE_ANON_KEY")?;
        let service_role_key = required(
            self.supabase_service_role_key.as_deref(),
            "RECIPES_SUPABASE_SERVICE_ROLE_KEY",
        )?;
        Ok(SupabaseConfig {
            base_url,
            anon_key: anon_key.to_owned(),
            service_role_key: Zeroizing::new(service_role_key.to_owned()),
            timeout: self.http_timeout(),
        })
    }
}

/// Local token verification settings.
#[derive(Clone)]
pub struct JwtSettings {
    pub(crate) secret: Zeroizing<String>,
    pub(crate) audience: String,
}

/// Everything the server needs to wire adapters and bind the listener.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) supabase: SupabaseConfig,
    pub(crate) jwt: Option<JwtSettings>,
    pub(crate) image_bucket: String,
}

impl ServerConfig {
    /// Validate settings into a server configuration.
    ///
    /// # Errors
    /// Returns an error when a required setting is missing or the bind
    /// address does not parse.
    pub fn from_settings(settings: &AppSettings) -> std::io::Result<Self> {
        let bind_addr: SocketAddr = settings.bind_addr().parse().map_err(|err| {
            std::io::Error::other(format!(
                "invalid RECIPES_BIND_ADDR `{}`: {err}",
                settings.bind_addr()
            ))
        })?;
        let jwt = settings
            .jwt_secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
            .map(|secret| JwtSettings {
                secret: Zeroizing::new(secret.to_owned()),
                audience: settings.jwt_audience().to_owned(),
            });
        Ok(Self {
            bind_addr,
            supabase: settings.supabase_config()?,
            jwt,
            image_bucket: settings.image_bucket().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Settings loading and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 8] = [
        "RECIPES_BIND_ADDR",
        "RECIPES_SUPABASE_URL",
        "RECIPES_SUPABASE_ANON_KEY",
        "RECIPES_SUPABASE_SERVICE_ROLE_KEY",
        "RECIPES_JWT_SECRET",
        "RECIPES_JWT_AUDIENCE",
        "RECIPES_IMAGE_BUCKET",
        "RECIPES_HTTP_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("recipes-backend")])
            .expect("config should load")
    }

    fn cleared_env() -> Vec<(&'static str, Option<String>)> {
        KEYS.iter().map(|key| (*key, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared_env());

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.jwt_audience(), "authenticated");
        assert_eq!(settings.image_bucket(), RECIPE_IMAGE_BUCKET);
        assert_eq!(settings.http_timeout(), Duration::from_secs(10));
    }

    #[rstest]
    fn missing_project_url_aborts_start_up() {
        let _guard = lock_env(cleared_env());

        let err = ServerConfig::from_settings(&load_from_empty_args())
            .err()
            .expect("missing url should fail");
        assert!(err.to_string().contains("RECIPES_SUPABASE_URL"));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut env = cleared_env();
        env.extend([
            ("RECIPES_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("RECIPES_SUPABASE_URL", Some("https://abc.supabase.co".to_owned())),
            ("RECIPES_SUPABASE_ANON_KEY", Some("anon".to_owned())),
            ("RECIPES_SUPABASE_SERVICE_ROLE_KEY", Some("service".to_owned())),
            ("RECIPES_JWT_SECRET", Some("secret".to_owned())),
            ("RECIPES_IMAGE_BUCKET", Some("dishes".to_owned())),
            ("RECIPES_HTTP_TIMEOUT_SECS", Some("3".to_owned())),
        ]);
        let _guard = lock_env(env);

        let config = ServerConfig::from_settings(&load_from_empty_args()).expect("valid config");
        assert_eq!(config.bind_addr, "127.0.0.1:9090".parse().expect("addr"));
        assert_eq!(config.supabase.base_url.as_str(), "https://abc.supabase.co/");
        assert_eq!(config.supabase.timeout, Duration::from_secs(3));
        assert_eq!(config.image_bucket, "dishes");
        let jwt = config.jwt.expect("jwt settings");
        assert_eq!(jwt.audience, "authenticated");
        assert_eq!(jwt.secret.as_str(), "secret");
    }

    #[rstest]
    #[case("not-an-address")]
    #[case("localhost")]
    fn malformed_bind_addresses_are_rejected(#[case] addr: &str) {
        let mut env = cleared_env();
        env.extend([
            ("RECIPES_BIND_ADDR", Some(addr.to_owned())),
            ("RECIPES_SUPABASE_URL", Some("https://abc.supabase.co".to_owned())),
            ("RECIPES_SUPABASE_ANON_KEY", Some("anon".to_owned())),
            ("RECIPES_SUPABASE_SERVICE_ROLE_KEY", Some("service".to_owned())),
        ]);
        let _guard = lock_env(env);

        let err = ServerConfig::from_settings(&load_from_empty_args())
            .err()
            .expect("bad address should fail");
        assert!(err.to_string().contains("RECIPES_BIND_ADDR"));
    }
}
