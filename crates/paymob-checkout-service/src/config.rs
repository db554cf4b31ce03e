//! Service configuration.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use paymob_checkout_client::{ClientOptions, Credentials, ACCEPT_BASE_URL};
use secrecy::{ExposeSecret, SecretString};

/// Service configuration loaded from environment variables.
///
/// Built once at startup and never re-read.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:5000").
    pub listen_addr: String,

    /// Paymob merchant credentials (`PAYMOB_*`).
    pub credentials: Credentials,

    /// Dedicated webhook HMAC secret. Falls back to the secret key when unset.
    pub hmac_secret: Option<SecretString>,

    /// Reject webhooks that cannot be verified instead of accepting them.
    pub require_webhook_signature: bool,

    /// Paymob API base URL.
    pub gateway_base_url: String,

    /// Outbound gateway request timeout. `None` means no client-side timeout.
    pub gateway_timeout_seconds: Option<u64>,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Inbound request timeout in seconds. `None` disables the timeout layer.
    pub request_timeout_seconds: Option<u64>,
}

impl ServiceConfig {
    /// Load configuration from the environment (and `.env`, if present).
    #[must_use]
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::info!(path = %path.display(), "Loaded environment from file");
        }

        Self {
            listen_addr: env_var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into()),
            credentials: Credentials::from_env(),
            hmac_secret: env_var("PAYMOB_HMAC_SECRET").map(SecretString::new),
            require_webhook_signature: env_var("PAYMOB_REQUIRE_WEBHOOK_SIGNATURE")
                .is_some_and(|v| parse_flag(&v)),
            gateway_base_url: env_var("PAYMOB_BASE_URL").unwrap_or_else(|| ACCEPT_BASE_URL.into()),
            gateway_timeout_seconds: parse_setting(
                "PAYMOB_HTTP_TIMEOUT_SECONDS",
                env_var("PAYMOB_HTTP_TIMEOUT_SECONDS"),
            ),
            cors_origins: env_var("CORS_ORIGINS")
                .unwrap_or_else(|| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: parse_setting("MAX_BODY_BYTES", env_var("MAX_BODY_BYTES"))
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
            request_timeout_seconds: parse_setting(
                "REQUEST_TIMEOUT_SECONDS",
                env_var("REQUEST_TIMEOUT_SECONDS"),
            ),
        }
    }

    /// Secret used to verify webhook signatures, if any.
    #[must_use]
    pub fn webhook_secret(&self) -> Option<&str> {
        self.hmac_secret
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .or_else(|| self.credentials.secret_key())
    }

    /// Options for the gateway client.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.gateway_base_url.clone(),
            timeout: self.gateway_timeout_seconds.map(Duration::from_secs),
        }
    }
}

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024; // 1MB

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an optional setting; a malformed value is logged and treated as unset.
fn parse_setting<T>(name: &str, raw: Option<String>) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(setting = name, value = %raw, error = %e, "Ignoring malformed setting");
            None
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.into(),
            credentials: Credentials::default(),
            hmac_secret: None,
            require_webhook_signature: false,
            gateway_base_url: ACCEPT_BASE_URL.into(),
            gateway_timeout_seconds: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout_seconds: None,
        }
    }
}
