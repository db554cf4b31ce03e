//! Webhook handler for Paymob transaction callbacks.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::crypto::verify_signature;
use crate::error::ApiError;
use crate::state::AppState;

/// Signature headers, in order of precedence.
const SIGNATURE_HEADERS: [&str; 2] = ["x-signature", "x-callback-signature"];

/// Webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Whether the webhook was accepted.
    pub received: bool,
}

/// Outcome of signature verification for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Signature matched.
    Verified,
    /// No secret or no signature, and unsigned webhooks are allowed.
    Skipped,
}

/// Handle Paymob webhooks.
pub async fn paymob_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    let verification = verify_webhook(&state.config, &headers, &body)?;

    process_notification(&body, verification)?;

    Ok(Json(WebhookResponse { received: true }))
}

/// Verify the webhook signature over the raw body.
///
/// Without a configured secret or a signature header, verification is
/// skipped (and logged) unless `require_webhook_signature` is set.
pub fn verify_webhook(
    config: &ServiceConfig,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Verification, ApiError> {
    let signature = SIGNATURE_HEADERS
        .iter()
        .find_map(|name| headers.get(*name));

    let (secret, signature) = match (config.webhook_secret(), signature) {
        (Some(secret), Some(signature)) => (secret, signature),
        (secret, _) => {
            let reason = if secret.is_none() {
                "no webhook secret configured"
            } else {
                "no signature header"
            };

            if config.require_webhook_signature {
                tracing::warn!(reason, "Rejecting unverifiable webhook");
                return Err(ApiError::InvalidSignature);
            }

            tracing::warn!(reason, "Accepting webhook WITHOUT signature verification");
            return Ok(Verification::Skipped);
        }
    };

    let Ok(signature) = signature.to_str() else {
        tracing::warn!("Webhook signature header is not valid UTF-8");
        return Err(ApiError::InvalidSignature);
    };

    if verify_signature(secret, body, signature) {
        Ok(Verification::Verified)
    } else {
        tracing::warn!("Invalid webhook signature");
        Err(ApiError::InvalidSignature)
    }
}

/// Accept a verified notification.
///
/// Bodies that are not JSON are accepted and logged by size only; a JSON
/// body that is not an object cannot be a transaction callback and is
/// rejected.
fn process_notification(body: &[u8], verification: Verification) -> Result<(), ApiError> {
    let Ok(payload) = serde_json::from_slice::<Value>(body) else {
        tracing::warn!(
            bytes = body.len(),
            verification = ?verification,
            "Received webhook with non-JSON body"
        );
        return Ok(());
    };

    if !payload.is_object() {
        return Err(ApiError::BadRequest(
            "webhook payload must be a JSON object".into(),
        ));
    }

    log_notification(&payload, verification);
    Ok(())
}

fn log_notification(payload: &Value, verification: Verification) {
    let obj = payload.get("obj");

    let event_type = payload.get("type").and_then(Value::as_str);
    let transaction_id = obj.and_then(|o| o.get("id")).and_then(Value::as_i64);
    let success = obj.and_then(|o| o.get("success")).and_then(Value::as_bool);
    let order_id = obj
        .and_then(|o| o.get("order"))
        .and_then(|o| o.get("id"))
        .and_then(Value::as_i64);

    tracing::info!(
        event_type = ?event_type,
        transaction_id = ?transaction_id,
        success = ?success,
        order_id = ?order_id,
        verification = ?verification,
        "Received Paymob webhook"
    );
    tracing::debug!(payload = %payload, "Webhook payload");
}
