//! Paymob Accept client.
//!
//! Thin async client for the two Paymob checkout flows:
//!
//! - **Iframe flow** (legacy): auth token → order → payment key → hosted iframe
//! - **Intention API**: one call returning a `client_secret` for unified checkout
//!
//! # Example
//!
//! ```no_run
//! use paymob_checkout_client::{Credentials, IntentionRequest, PaymobClient};
//!
//! # async fn example() -> Result<(), paymob_checkout_client::GatewayError> {
//! let client = PaymobClient::new(Credentials::from_env())?;
//!
//! let intention = client
//!     .create_intention(&IntentionRequest {
//!         amount: 2000,
//!         ..IntentionRequest::default()
//!     })
//!     .await?;
//!
//! println!("client secret: {:?}", intention.get("client_secret"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod credentials;
mod error;
mod types;

pub use client::{
    generate_merchant_order_id, iframe_url, unified_checkout_url, ClientOptions, PaymobClient,
    ACCEPT_BASE_URL,
};
pub use credentials::Credentials;
pub use error::GatewayError;
pub use types::*;
