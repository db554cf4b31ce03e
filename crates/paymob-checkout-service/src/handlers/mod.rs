//! API handlers.

pub mod checkout;
pub mod health;
pub mod intentions;
pub mod webhooks;
