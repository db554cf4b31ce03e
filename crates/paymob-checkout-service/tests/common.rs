//! Common test utilities for paymob-checkout integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum::Router;
use axum_test::TestServer;
use secrecy::SecretString;
use wiremock::MockServer;

use paymob_checkout_client::Credentials;
use paymob_checkout_service::{create_router, AppState, ServiceConfig};

pub const SECRET_KEY: &str = "sk_test_secret";
pub const PUBLIC_KEY: &str = "pk_test_public";
pub const IFRAME_ID: &str = "812345";
pub const INTEGRATION_ID: u64 = 4_567_890;

/// Test harness: the service under test plus a mocked Paymob API.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Stand-in for `accept.paymob.com`.
    pub gateway: MockServer,
}

impl TestHarness {
    /// Harness with every credential configured.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Harness with a customised configuration.
    pub async fn with_config(customise: impl FnOnce(&mut ServiceConfig)) -> Self {
        let gateway = MockServer::start().await;

        let mut config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            credentials: full_credentials(),
            gateway_base_url: gateway.uri(),
            ..ServiceConfig::default()
        };
        customise(&mut config);

        let state = AppState::new(config).expect("Failed to build app state");
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, gateway }
    }

    /// Number of requests the mocked gateway has seen.
    pub async fn gateway_calls(&self) -> usize {
        self.gateway
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

pub fn full_credentials() -> Credentials {
    Credentials {
        api_key: Some(SecretString::new("test-api-key".into())),
        secret_key: Some(SecretString::new(SECRET_KEY.into())),
        public_key: Some(PUBLIC_KEY.into()),
        integration_id: Some(INTEGRATION_ID),
        iframe_id: Some(IFRAME_ID.into()),
        notification_url: None,
        redirection_url: None,
    }
}

/// A local URL nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind port");
    let port = listener.local_addr().expect("Failed to read local addr").port();
    format!("http://127.0.0.1:{port}")
}
