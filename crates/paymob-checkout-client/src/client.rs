//! Paymob Accept HTTP client implementation.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::credentials::Credentials;
use crate::error::GatewayError;
use crate::types::{
    AuthRequest, AuthResponse, BillingData, IntentionPayload, IntentionRequest, Item, OrderRequest,
    OrderResponse, PaymentKeyRequest, PaymentKeyResponse, PaymentMethod, DEFAULT_CURRENCY,
    DEFAULT_EXPIRATION_SECONDS,
};

/// Public Paymob Accept host. Hosted checkout URLs always point here.
pub const ACCEPT_BASE_URL: &str = "https://accept.paymob.com";

const AUTH_TOKENS_PATH: &str = "/api/auth/tokens";
const ORDERS_PATH: &str = "/api/ecommerce/orders";
const PAYMENT_KEYS_PATH: &str = "/api/acceptance/payment_keys";
const INTENTION_PATH: &str = "/v1/intention/";

/// Client options.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL (default: `https://accept.paymob.com`).
    pub base_url: String,
    /// Per-request timeout. `None` waits until the OS gives up.
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: ACCEPT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Paymob Accept API client.
///
/// Covers both the legacy iframe flow (auth token, order, payment key) and
/// the Intention API. The two use different authentication: legacy calls
/// carry `Authorization: Bearer <auth token>`, intentions carry
/// `Authorization: Token <secret key>`.
#[derive(Debug, Clone)]
pub struct PaymobClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl PaymobClient {
    /// Create a client against the public Paymob host.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, GatewayError> {
        Self::with_options(credentials, ClientOptions::default())
    }

    /// Create a client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_options(
        credentials: Credentials,
        options: ClientOptions,
    ) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// The credentials this client was built with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Obtain an auth token for the legacy flow.
    ///
    /// # Errors
    ///
    /// `Configuration` if `PAYMOB_API_KEY` is unset, otherwise any transport
    /// or status error from the gateway.
    pub async fn authenticate(&self) -> Result<String, GatewayError> {
        let api_key = self.credentials.api_key().ok_or_else(|| {
            GatewayError::Configuration("PAYMOB_API_KEY not set in environment".into())
        })?;

        tracing::debug!("Requesting Paymob auth token");

        let response: AuthResponse = self
            .post_json(AUTH_TOKENS_PATH, &AuthRequest { api_key }, None)
            .await?;

        response
            .token
            .ok_or_else(|| GatewayError::UnexpectedResponse("auth response has no token".into()))
    }

    /// Create an ecommerce order and return the gateway's order id.
    ///
    /// # Errors
    ///
    /// Any transport or status error from the gateway.
    pub async fn create_order(
        &self,
        auth_token: &str,
        amount_cents: i64,
        items: Option<&[Item]>,
    ) -> Result<u64, GatewayError> {
        let payload = OrderRequest {
            delivery_needed: false,
            amount_cents,
            currency: DEFAULT_CURRENCY,
            items: items.unwrap_or_default(),
        };

        let response: OrderResponse = self
            .post_json(
                ORDERS_PATH,
                &payload,
                Some(format!("Bearer {auth_token}").as_str()),
            )
            .await?;

        let order_id = response
            .id
            .ok_or_else(|| GatewayError::UnexpectedResponse("order response has no id".into()))?;

        tracing::info!(order_id, amount_cents, "Paymob order created");
        Ok(order_id)
    }

    /// Request a payment key (iframe payment token) for an order.
    ///
    /// Falls back to the configured integration id and to placeholder
    /// billing data when the caller passes none.
    ///
    /// # Errors
    ///
    /// `Configuration` when no integration id is available, otherwise any
    /// transport or status error from the gateway.
    pub async fn get_payment_key(
        &self,
        auth_token: &str,
        order_id: u64,
        amount_cents: i64,
        billing_data: Option<&BillingData>,
        integration_id: Option<u64>,
    ) -> Result<String, GatewayError> {
        let integration_id = integration_id
            .or(self.credentials.integration_id)
            .ok_or_else(|| {
                GatewayError::Configuration(
                    "integration_id not set (env PAYMOB_INTEGRATION_ID)".into(),
                )
            })?;

        let fallback;
        let billing_data = if let Some(billing) = billing_data {
            billing
        } else {
            fallback = BillingData::test_customer();
            &fallback
        };

        let payload = PaymentKeyRequest {
            auth_token,
            amount_cents,
            expiration: DEFAULT_EXPIRATION_SECONDS,
            order_id,
            billing_data,
            currency: DEFAULT_CURRENCY,
            integration_id,
        };

        let response: PaymentKeyResponse = self
            .post_json(
                PAYMENT_KEYS_PATH,
                &payload,
                Some(format!("Bearer {auth_token}").as_str()),
            )
            .await?;

        response.token.ok_or_else(|| {
            GatewayError::UnexpectedResponse("payment key response has no token".into())
        })
    }

    /// Create a payment intention and return the gateway's raw response.
    ///
    /// Optional keys (`extras`, `special_reference`, `notification_url`,
    /// `redirection_url`, `integration_id`) are omitted from the outbound
    /// body when neither the request nor the credentials provide them.
    ///
    /// # Errors
    ///
    /// `Configuration` if `PAYMOB_SECRET_KEY` is unset, otherwise any
    /// transport or status error from the gateway.
    pub async fn create_intention(
        &self,
        request: &IntentionRequest,
    ) -> Result<Value, GatewayError> {
        let secret_key = self.require_secret_key()?;

        let merchant_order_id = request
            .merchant_order_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(generate_merchant_order_id);

        let payment_methods = if request.payment_methods.is_empty() {
            self.credentials
                .integration_id
                .map(PaymentMethod::Id)
                .into_iter()
                .collect()
        } else {
            request.payment_methods.clone()
        };

        let payload = IntentionPayload {
            amount: request.amount,
            currency: &request.currency,
            merchant_order_id,
            integration_id: self.credentials.integration_id,
            payment_methods,
            items: &request.items,
            billing_data: &request.billing_data,
            expiration: request.expiration,
            extras: request.extras.as_ref().filter(|v| !is_empty_value(v)),
            special_reference: non_empty(request.special_reference.as_deref()),
            notification_url: non_empty(request.notification_url.as_deref())
                .or(self.credentials.notification_url.as_deref()),
            redirection_url: non_empty(request.redirection_url.as_deref())
                .or(self.credentials.redirection_url.as_deref()),
        };

        tracing::info!(
            merchant_order_id = %payload.merchant_order_id,
            amount = payload.amount,
            currency = %payload.currency,
            "Creating Paymob intention"
        );

        let authorization = format!("Token {secret_key}");
        let response = self
            .post_json(INTENTION_PATH, &payload, Some(authorization.as_str()))
            .await?;
        Ok(response)
    }

    /// Create an intention from a fixed demo payload.
    ///
    /// Unlike every other operation, gateway failures are returned as
    /// `Ok({"error": "<message>"})` instead of an error. A missing secret key
    /// is still an error.
    ///
    /// # Errors
    ///
    /// `Configuration` if `PAYMOB_SECRET_KEY` is unset.
    pub async fn create_intention_demo(&self) -> Result<Value, GatewayError> {
        let secret_key = self.require_secret_key()?;

        let payload = json!({
            "amount": 2000,
            "currency": "EGP",
            "payment_methods": [158],
            "items": [
                {
                    "name": "Item name",
                    "amount": 2000,
                    "description": "Item description",
                    "quantity": 1
                }
            ],
            "billing_data": {
                "apartment": "dummy",
                "first_name": "Demo",
                "last_name": "Customer",
                "street": "dummy",
                "building": "dummy",
                "phone_number": "+201000000000",
                "city": "dummy",
                "country": "dummy",
                "email": "demo@example.com",
                "floor": "dummy",
                "state": "dummy"
            },
            "extras": { "ee": 22 },
            "special_reference": "demo-special-reference",
            "expiration": DEFAULT_EXPIRATION_SECONDS,
            "notification_url": "https://webhook.site/paymob-demo",
            "redirection_url": "https://www.example.com/"
        });

        let authorization = format!("Token {secret_key}");
        let result = self
            .post_json::<_, Value>(INTENTION_PATH, &payload, Some(authorization.as_str()))
            .await;

        match result {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::warn!(error = %e, "Demo intention failed");
                Ok(json!({ "error": e.to_string() }))
            }
        }
    }

    fn require_secret_key(&self) -> Result<&str, GatewayError> {
        self.credentials.secret_key().ok_or_else(|| {
            GatewayError::Configuration("PAYMOB_SECRET_KEY not set in environment".into())
        })
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        authorization: Option<&str>,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{path}", self.base_url);

        let mut request = self.client.post(&url).json(body);
        if let Some(authorization) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, authorization);
        }

        let response = request.send().await?;
        Self::handle_response(&url, response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, url = %url, body = %body, "Paymob request failed");

        Err(GatewayError::Api {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        })
    }
}

/// Legacy hosted iframe URL for a payment key.
#[must_use]
pub fn iframe_url(iframe_id: &str, payment_token: &str) -> String {
    format!("{ACCEPT_BASE_URL}/api/acceptance/iframes/{iframe_id}?payment_token={payment_token}")
}

/// Unified checkout URL for an intention's client secret.
#[must_use]
pub fn unified_checkout_url(public_key: &str, client_secret: &str) -> String {
    format!("{ACCEPT_BASE_URL}/unifiedcheckout/?publicKey={public_key}&clientSecret={client_secret}")
}

/// Generate a merchant order id: `morder-<unix seconds>-<6 hex chars>`.
#[must_use]
pub fn generate_merchant_order_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("morder-{}-{}", chrono::Utc::now().timestamp(), &suffix[..6])
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
