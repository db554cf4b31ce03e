//! Gateway error types.

/// Errors that can occur when talking to the Paymob gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A credential or identifier required by the operation is not configured.
    #[error("{0}")]
    Configuration(String),

    /// HTTP request failed (connect, read, or body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned a non-success status.
    #[error("{status} error from {url}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Endpoint that was called.
        url: String,
        /// Raw response body.
        body: String,
    },

    /// Gateway answered successfully but without a field we need.
    #[error("unexpected gateway response: {0}")]
    UnexpectedResponse(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GatewayError {
    /// Whether this error stems from missing local configuration rather than the gateway.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
