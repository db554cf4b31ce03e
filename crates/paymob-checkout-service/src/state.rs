//! Application state.

use std::sync::Arc;

use paymob_checkout_client::{GatewayError, PaymobClient};

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Paymob gateway client.
    pub paymob: Arc<PaymobClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway HTTP client cannot be built.
    pub fn new(config: ServiceConfig) -> Result<Self, GatewayError> {
        let paymob =
            PaymobClient::with_options(config.credentials.clone(), config.client_options())?;

        let credentials = &config.credentials;
        if credentials.api_key.is_none() {
            tracing::warn!("PAYMOB_API_KEY not set - iframe checkout will not be available");
        }
        if credentials.secret_key.is_none() {
            tracing::warn!("PAYMOB_SECRET_KEY not set - intentions will not be available");
        }
        if config.webhook_secret().is_none() {
            if config.require_webhook_signature {
                tracing::warn!("No webhook secret configured - every webhook will be rejected");
            } else {
                tracing::warn!(
                    "No webhook secret configured - webhooks will be accepted WITHOUT verification"
                );
            }
        }

        Ok(Self {
            config,
            paymob: Arc::new(paymob),
        })
    }
}
