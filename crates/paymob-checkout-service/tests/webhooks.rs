//! Webhook endpoint integration tests.

mod common;

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use secrecy::SecretString;
use serde_json::{json, Value};

use common::TestHarness;
use paymob_checkout_service::crypto::hmac_sha256_hex;

async fn harness_with_secret(secret: &str) -> TestHarness {
    let secret = secret.to_string();
    TestHarness::with_config(move |config| {
        config.credentials.secret_key = Some(SecretString::new(secret));
    })
    .await
}

#[tokio::test]
async fn valid_hex_signature_is_accepted() {
    let harness = harness_with_secret("abc").await;

    let response = harness
        .server
        .post("/webhook")
        .add_header("x-signature", hmac_sha256_hex("abc", b"hello"))
        .text("hello")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "received": true }));
}

#[tokio::test]
async fn invalid_signature_is_rejected() {
    let harness = harness_with_secret("abc").await;

    let response = harness
        .server
        .post("/webhook")
        .add_header("x-signature", hmac_sha256_hex("abc", b"goodbye"))
        .text("hello")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "invalid signature" }));
}

#[tokio::test]
async fn base64_of_raw_digest_is_accepted() {
    let harness = harness_with_secret("abc").await;
    let raw = hex::decode(hmac_sha256_hex("abc", b"hello")).unwrap();

    let response = harness
        .server
        .post("/webhook")
        .add_header("x-signature", STANDARD.encode(raw))
        .text("hello")
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn callback_signature_header_is_honoured() {
    let harness = harness_with_secret("abc").await;
    let payload = json!({
        "type": "TRANSACTION",
        "obj": { "id": 192_036_465, "success": true, "order": { "id": 217_503_754 } }
    })
    .to_string();

    let response = harness
        .server
        .post("/webhook")
        .add_header("x-callback-signature", hmac_sha256_hex("abc", payload.as_bytes()))
        .add_header("content-type", "application/json")
        .text(payload)
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn signature_is_computed_over_raw_bytes() {
    let harness = harness_with_secret("abc").await;
    let compact = r#"{"type":"TRANSACTION"}"#;
    let spaced = r#"{ "type": "TRANSACTION" }"#;

    let response = harness
        .server
        .post("/webhook")
        .add_header("x-signature", hmac_sha256_hex("abc", compact.as_bytes()))
        .text(spaced)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unsigned_webhook_without_secret_is_accepted() {
    let harness = TestHarness::with_config(|config| {
        config.credentials.secret_key = None;
    })
    .await;

    let response = harness
        .server
        .post("/webhook")
        .json(&json!({ "type": "TRANSACTION", "obj": { "success": false } }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["received"], true);
}

#[tokio::test]
async fn unsigned_webhook_with_secret_is_accepted() {
    let harness = harness_with_secret("abc").await;

    let response = harness.server.post("/webhook").text("hello").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn unsigned_webhook_is_rejected_when_signatures_required() {
    let harness = TestHarness::with_config(|config| {
        config.credentials.secret_key = None;
        config.require_webhook_signature = true;
    })
    .await;

    let response = harness.server.post("/webhook").text("hello").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid signature");
}

#[tokio::test]
async fn non_object_payload_is_bad_request() {
    let harness = harness_with_secret("abc").await;
    let payload = "[1,2,3]";

    let response = harness
        .server
        .post("/webhook")
        .add_header("x-signature", hmac_sha256_hex("abc", payload.as_bytes()))
        .text(payload)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn signed_malformed_json_is_accepted() {
    let harness = harness_with_secret("abc").await;
    let payload = "{not json";

    let response = harness
        .server
        .post("/webhook")
        .add_header("x-signature", hmac_sha256_hex("abc", payload.as_bytes()))
        .text(payload)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "received": true }));
}
