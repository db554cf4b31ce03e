//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use paymob_checkout_client::GatewayError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required `PAYMOB_*` value is not configured.
    #[error("{0}")]
    Configuration(String),

    /// The gateway call failed (transport or non-success status).
    #[error("{0}")]
    Gateway(String),

    /// Webhook signature did not match.
    #[error("invalid signature")]
    InvalidSignature,

    /// Bad request - invalid input.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Configuration(_) | Self::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Render as `text/plain` (`Error: <message>`) for browser-facing routes.
    #[must_use]
    pub fn into_text_response(self) -> Response {
        (self.status(), format!("Error: {self}")).into_response()
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Configuration(msg) => {
                tracing::error!(error = %msg, "Missing configuration");
            }
            Self::Gateway(msg) => {
                tracing::error!(error = %msg, "Gateway request failed");
            }
            Self::InvalidSignature | Self::BadRequest(_) => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Configuration(msg) => Self::Configuration(msg),
            other => Self::Gateway(other.to_string()),
        }
    }
}
