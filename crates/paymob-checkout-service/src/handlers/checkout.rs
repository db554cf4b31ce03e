//! Browser-facing checkout handlers.

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use paymob_checkout_client::iframe_url;

use crate::error::ApiError;
use crate::state::AppState;

/// Amount charged by the iframe checkout, in minor units.
pub const IFRAME_AMOUNT_CENTS: i64 = 10_000;

const CHECKOUT_PAGE: &str = include_str!("../../templates/pay.html");

/// Text shown to the customer after the gateway redirects back.
pub const CALLBACK_MESSAGE: &str =
    "Thank you! Your payment is being processed. You will receive a confirmation shortly.";

/// Checkout landing page.
pub async fn home() -> Html<&'static str> {
    Html(CHECKOUT_PAGE)
}

/// Start the legacy iframe checkout and redirect the browser to it.
///
/// Errors are rendered as plain text with status 500.
pub async fn pay(State(state): State<Arc<AppState>>) -> Response {
    match iframe_checkout_url(&state).await {
        Ok(url) => {
            tracing::info!(url = %url, "Redirecting to Paymob iframe");
            (StatusCode::FOUND, [(header::LOCATION, url)]).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Iframe checkout failed");
            e.into_text_response()
        }
    }
}

async fn iframe_checkout_url(state: &AppState) -> Result<String, ApiError> {
    let iframe_id = state
        .config
        .credentials
        .iframe_id
        .as_deref()
        .ok_or_else(|| ApiError::Configuration("Missing IFRAME ID configuration".into()))?;

    let auth_token = state.paymob.authenticate().await?;
    let order_id = state
        .paymob
        .create_order(&auth_token, IFRAME_AMOUNT_CENTS, None)
        .await?;
    let payment_token = state
        .paymob
        .get_payment_key(&auth_token, order_id, IFRAME_AMOUNT_CENTS, None, None)
        .await?;

    Ok(iframe_url(iframe_id, &payment_token))
}

/// Customer redirect target after checkout.
///
/// Payment state is not processed here; the webhook is authoritative.
pub async fn payment_callback(RawQuery(query): RawQuery) -> &'static str {
    tracing::info!(query = ?query, "Customer returned from checkout");
    CALLBACK_MESSAGE
}
