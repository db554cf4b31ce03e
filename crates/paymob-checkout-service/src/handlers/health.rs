//! Health check handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Which gateway flows have the credentials they need.
    pub gateway: GatewayStatus,
}

/// Configured gateway capabilities.
#[derive(Debug, Serialize)]
pub struct GatewayStatus {
    /// Legacy iframe flow (API key, integration id, iframe id).
    pub iframe: bool,
    /// Intention API (secret key).
    pub intention: bool,
    /// Unified checkout redirect (public key).
    pub unified_checkout: bool,
    /// Webhook signature verification (secret present).
    pub webhook_verification: bool,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let credentials = &state.config.credentials;

    Json(HealthResponse {
        status: "ok".to_string(),
        service: "paymob-checkout".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        gateway: GatewayStatus {
            iframe: credentials.api_key.is_some()
                && credentials.integration_id.is_some()
                && credentials.iframe_id.is_some(),
            intention: credentials.secret_key.is_some(),
            unified_checkout: credentials.public_key.is_some(),
            webhook_verification: state.config.webhook_secret().is_some(),
        },
    })
}
