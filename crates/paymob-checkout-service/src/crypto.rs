//! Webhook signature verification.
//!
//! Paymob callbacks are signed with HMAC-SHA256 over the raw request body.
//! The signature arrives hex-encoded; some senders base64-encode the raw
//! digest instead, so both encodings are accepted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 over raw bytes and return the lowercase hex digest.
///
/// # Panics
///
/// Never in practice: HMAC accepts keys of any length (RFC 2104).
#[must_use]
pub fn hmac_sha256_hex(secret: &str, message: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC-SHA256 accepts any key size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison. Strings of different length never match.
#[must_use]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check `signature` against the HMAC of `body`.
///
/// Tries the hex digest first, then base64 of the raw digest bytes.
#[must_use]
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let expected = hmac_sha256_hex(secret, body);

    if constant_time_eq(&expected, signature) {
        return true;
    }

    match hex::decode(&expected) {
        Ok(raw) => constant_time_eq(&STANDARD.encode(raw), signature),
        Err(e) => {
            tracing::warn!(error = %e, "Could not re-encode webhook digest");
            false
        }
    }
}
