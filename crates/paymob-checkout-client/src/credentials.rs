//! Merchant credentials.

use secrecy::{ExposeSecret, SecretString};

/// Merchant credentials and per-merchant defaults, read once at startup.
///
/// Every field is optional: each gateway operation checks for the values it
/// needs and fails with [`GatewayError::Configuration`](crate::GatewayError)
/// when they are missing.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// API key for `/api/auth/tokens` (legacy flow).
    pub api_key: Option<SecretString>,

    /// Secret key (`sk_test_...` / `sk_live_...`) for the Intention API.
    pub secret_key: Option<SecretString>,

    /// Public key used to build the unified checkout URL.
    pub public_key: Option<String>,

    /// Default integration id (payment method) for payment keys and intentions.
    pub integration_id: Option<u64>,

    /// Iframe id for the legacy hosted iframe.
    pub iframe_id: Option<String>,

    /// Default server-to-server notification URL for intentions.
    pub notification_url: Option<String>,

    /// Default customer redirection URL for intentions.
    pub redirection_url: Option<String>,
}

impl Credentials {
    /// Load credentials from the `PAYMOB_*` environment variables.
    ///
    /// Empty values are treated as unset. A non-numeric
    /// `PAYMOB_INTEGRATION_ID` is logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let integration_id = env_var("PAYMOB_INTEGRATION_ID").and_then(|raw| {
            raw.trim().parse::<u64>().map_or_else(
                |_| {
                    tracing::warn!(value = %raw, "PAYMOB_INTEGRATION_ID is not a number, ignoring");
                    None
                },
                Some,
            )
        });

        Self {
            api_key: env_var("PAYMOB_API_KEY").map(SecretString::new),
            secret_key: env_var("PAYMOB_SECRET_KEY").map(SecretString::new),
            public_key: env_var("PAYMOB_PUBLIC_KEY"),
            integration_id,
            iframe_id: env_var("PAYMOB_IFRAME_ID"),
            notification_url: env_var("PAYMOB_NOTIFICATION_URL"),
            redirection_url: env_var("PAYMOB_REDIRECTION_URL"),
        }
    }

    /// The API key, if configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }

    /// The secret key, if configured.
    #[must_use]
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
