//! Intention API handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use paymob_checkout_client::{unified_checkout_url, IntentionRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// Create a payment intention.
///
/// Responds with `{checkout_url, intention_response}` when the gateway
/// returned a `client_secret` and a public key is configured, otherwise with
/// the gateway response unchanged.
pub async fn create_intention(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request = parse_intention_request(&body)?;

    let response = state.paymob.create_intention(&request).await?;

    let client_secret = response
        .get("client_secret")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let public_key = state.config.credentials.public_key.as_deref();

    if let Some((client_secret, public_key)) = client_secret.zip(public_key) {
        let checkout_url = unified_checkout_url(public_key, client_secret);
        tracing::info!(checkout_url = %checkout_url, "Intention created");
        return Ok(Json(json!({
            "checkout_url": checkout_url,
            "intention_response": response,
        })));
    }

    tracing::info!("Intention created without checkout URL");
    Ok(Json(response))
}

/// Create an intention from the fixed demo payload.
pub async fn demo_intention(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let response = state.paymob.create_intention_demo().await?;
    Ok(Json(response))
}

/// Parse the request body. An empty body, `null`, and `null` fields all mean
/// "use the default".
fn parse_intention_request(body: &[u8]) -> Result<IntentionRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(IntentionRequest::default());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))?;

    let value = match value {
        Value::Null => return Ok(IntentionRequest::default()),
        Value::Object(mut fields) => {
            fields.retain(|_, v| !v.is_null());
            Value::Object(fields)
        }
        _ => return Err(ApiError::BadRequest("request body must be a JSON object".into())),
    };

    serde_json::from_value(value)
        .map_err(|e| ApiError::BadRequest(format!("invalid intention request: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_uses_defaults() {
        assert_eq!(parse_intention_request(b"").unwrap(), IntentionRequest::default());
        assert_eq!(parse_intention_request(b"  \n").unwrap(), IntentionRequest::default());
        assert_eq!(parse_intention_request(b"null").unwrap(), IntentionRequest::default());
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let request =
            parse_intention_request(br#"{"amount": 500, "items": null, "billing_data": null}"#)
                .unwrap();
        assert_eq!(request.amount, 500);
        assert!(request.items.is_empty());
    }

    #[test]
    fn malformed_body_is_bad_request() {
        assert!(matches!(
            parse_intention_request(b"{not json"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            parse_intention_request(b"[1, 2]"),
            Err(ApiError::BadRequest(_))
        ));
    }
}
