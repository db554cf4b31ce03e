//! Paymob checkout HTTP service.
//!
//! This crate provides the merchant-side HTTP surface for Paymob Accept:
//!
//! - Checkout landing page and iframe redirect (legacy flow)
//! - Payment intentions with unified checkout URLs
//! - Transaction webhooks with HMAC-SHA256 verification
//!
//! Nothing is persisted; every request is handled independently.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for axum

pub mod config;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
