//! Paymob Checkout Service - merchant endpoints for Paymob Accept
//!
//! This is the main entry point for the paymob-checkout service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paymob_checkout_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,paymob_checkout=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Paymob Checkout Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        gateway_base_url = %config.gateway_base_url,
        gateway_timeout_seconds = ?config.gateway_timeout_seconds,
        request_timeout_seconds = ?config.request_timeout_seconds,
        api_key_configured = %config.credentials.api_key.is_some(),
        secret_key_configured = %config.credentials.secret_key.is_some(),
        public_key_configured = %config.credentials.public_key.is_some(),
        integration_id = ?config.credentials.integration_id,
        iframe_id = ?config.credentials.iframe_id,
        require_webhook_signature = %config.require_webhook_signature,
        "Service configuration loaded"
    );

    let state = AppState::new(config.clone())?;

    let app = create_router(state);
    tracing::info!("Router configured with all endpoints");

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
