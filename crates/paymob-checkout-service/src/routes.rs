//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{checkout, health, intentions, webhooks};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Browser
/// - `GET /` - Checkout landing page
/// - `GET /pay` - Iframe checkout (redirect)
/// - `GET|POST /payment_callback` - Customer return page
///
/// ## API
/// - `POST /create-intention` - Create an intention
/// - `GET /demo-intention` - Create a demo intention
/// - `GET /health` - Health check
///
/// ## Webhooks (Signature verification)
/// - `POST /webhook` - Paymob transaction callbacks
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let router = Router::new()
        .route("/", get(checkout::home))
        .route("/health", get(health::health))
        .route("/pay", get(checkout::pay))
        .route(
            "/payment_callback",
            get(checkout::payment_callback).post(checkout::payment_callback),
        )
        .route("/create-intention", post(intentions::create_intention))
        .route("/demo-intention", get(intentions::demo_intention))
        .route("/webhook", post(webhooks::paymob_webhook));

    let router = router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes));

    // Off unless configured: a timed-out request answers 408 with no body.
    let router = match request_timeout_seconds {
        Some(seconds) => router.layer(TimeoutLayer::new(Duration::from_secs(seconds))),
        None => router,
    };

    router.with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
