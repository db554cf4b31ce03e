//! Request and response types for the Paymob Accept API.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Default intention / payment key lifetime in seconds.
pub const DEFAULT_EXPIRATION_SECONDS: u64 = 3600;

/// Currency used when the caller does not pick one.
pub const DEFAULT_CURRENCY: &str = "EGP";

/// Amount used by the checkout page when the caller does not pick one (minor units).
pub const DEFAULT_AMOUNT_CENTS: i64 = 10_000;

/// A line item on an order or intention.
///
/// Nothing is required locally; fields the gateway knows about but this type
/// does not (`sku`, `image`, `amount_cents`, ...) are passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Item name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Item amount in minor units.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<i64>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Any extra fields the caller sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// A single item with a name and an amount in minor units.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: Some(name.into()),
            amount: Some(amount),
            quantity: Some(1),
            ..Self::default()
        }
    }
}

/// Customer billing data.
///
/// Paymob requires these fields on payment keys; nothing is validated
/// locally. Values keep whatever JSON type the caller used (a numeric
/// `building` or `floor` is fine), and unknown fields are passed through.
#[allow(missing_docs)] // field names mirror the gateway's
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    /// Any extra fields the caller sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BillingData {
    /// Placeholder customer used for payment keys when the caller supplies none.
    #[must_use]
    pub fn test_customer() -> Self {
        let field = |v: &str| Some(Value::from(v));
        Self {
            apartment: field("803"),
            email: field("test@example.com"),
            floor: field("42"),
            first_name: field("Test"),
            last_name: field("User"),
            street: field("Test Street"),
            building: field("803"),
            phone_number: field("+201234567890"),
            shipping_method: field("PKG"),
            postal_code: field("01898"),
            city: field("Cairo"),
            country: field("EG"),
            state: field("Cairo"),
            extra: Map::new(),
        }
    }
}

/// A payment method on an intention: an integration id or a method name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentMethod {
    /// Numeric integration id.
    Id(u64),
    /// Named method (e.g. `"card"`).
    Name(String),
}

impl From<u64> for PaymentMethod {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

/// Caller input for [`PaymobClient::create_intention`](crate::PaymobClient::create_intention).
///
/// Deserializes from a partial JSON object; missing fields take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentionRequest {
    /// Amount in minor units (default 10000). Accepts `2000`, `2000.0` or `"2000"`.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: i64,
    /// ISO currency code (default `EGP`).
    pub currency: String,
    /// Payment methods; empty means "use the configured integration id".
    pub payment_methods: Vec<PaymentMethod>,
    /// Line items.
    pub items: Vec<Item>,
    /// Customer billing data.
    pub billing_data: BillingData,
    /// Overrides the configured notification URL.
    pub notification_url: Option<String>,
    /// Overrides the configured redirection URL.
    pub redirection_url: Option<String>,
    /// Merchant correlation id; generated when absent.
    pub merchant_order_id: Option<String>,
    /// Free-form extras echoed back by the gateway.
    pub extras: Option<Value>,
    /// Intention lifetime in seconds (default 3600).
    pub expiration: u64,
    /// Merchant special reference.
    pub special_reference: Option<String>,
}

impl Default for IntentionRequest {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT_CENTS,
            currency: DEFAULT_CURRENCY.to_string(),
            payment_methods: Vec::new(),
            items: Vec::new(),
            billing_data: BillingData::default(),
            notification_url: None,
            redirection_url: None,
            merchant_order_id: None,
            extras: None,
            expiration: DEFAULT_EXPIRATION_SECONDS,
            special_reference: None,
        }
    }
}

/// Whole minor units from an integer, a float (truncated) or a numeric string.
#[allow(clippy::cast_possible_truncation)]
fn amount_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < 9.2e18)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    amount_from_value(&value).ok_or_else(|| D::Error::custom(format!("invalid amount: {value}")))
}

fn deserialize_optional_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => amount_from_value(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid amount: {value}"))),
    }
}

// ============================================================================
// Wire payloads
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct AuthRequest<'a> {
    pub api_key: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrderRequest<'a> {
    pub delivery_needed: bool,
    pub amount_cents: i64,
    pub currency: &'a str,
    pub items: &'a [Item],
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderResponse {
    pub id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PaymentKeyRequest<'a> {
    pub auth_token: &'a str,
    pub amount_cents: i64,
    pub expiration: u64,
    pub order_id: u64,
    pub billing_data: &'a BillingData,
    pub currency: &'a str,
    pub integration_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentKeyResponse {
    pub token: Option<String>,
}

/// Outbound intention body. Optional keys are left out entirely when unset.
#[derive(Debug, Serialize)]
pub(crate) struct IntentionPayload<'a> {
    pub amount: i64,
    pub currency: &'a str,
    pub merchant_order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<u64>,
    pub payment_methods: Vec<PaymentMethod>,
    pub items: &'a [Item],
    pub billing_data: &'a BillingData,
    pub expiration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_reference: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirection_url: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn intention_request_fills_defaults_from_partial_json() {
        let request: IntentionRequest =
            serde_json::from_value(json!({ "amount": 2500 })).unwrap();

        assert_eq!(request.amount, 2500);
        assert_eq!(request.currency, "EGP");
        assert_eq!(request.expiration, 3600);
        assert!(request.payment_methods.is_empty());
        assert!(request.merchant_order_id.is_none());
    }

    #[test]
    fn payment_methods_accept_ids_and_names() {
        let methods: Vec<PaymentMethod> = serde_json::from_value(json!([158, "card"])).unwrap();
        assert_eq!(
            methods,
            vec![PaymentMethod::Id(158), PaymentMethod::Name("card".into())]
        );
    }

    #[test]
    fn billing_data_passes_unknown_fields_through() {
        let billing: BillingData = serde_json::from_value(json!({
            "first_name": "Mona",
            "national_id": "29001011234567"
        }))
        .unwrap();

        assert_eq!(billing.first_name, Some(json!("Mona")));
        let out = serde_json::to_value(&billing).unwrap();
        assert_eq!(out, json!({ "first_name": "Mona", "national_id": "29001011234567" }));
    }

    #[test]
    fn empty_billing_data_serializes_to_empty_object() {
        let out = serde_json::to_value(BillingData::default()).unwrap();
        assert_eq!(out, json!({}));
    }

    #[test]
    fn billing_data_keeps_numeric_values() {
        let billing: BillingData = serde_json::from_value(json!({
            "first_name": "Mona",
            "building": 12,
            "floor": 3
        }))
        .unwrap();

        let out = serde_json::to_value(&billing).unwrap();
        assert_eq!(out, json!({ "first_name": "Mona", "building": 12, "floor": 3 }));
    }

    #[test]
    fn items_pass_unknown_fields_through_unchanged() {
        let input = json!({ "name": "Mug", "amount": 500, "sku": "MUG-1", "image": "x.png" });
        let item: Item = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(item.name.as_deref(), Some("Mug"));
        assert_eq!(serde_json::to_value(&item).unwrap(), input);
    }

    #[test]
    fn legacy_items_may_carry_amount_cents_only() {
        let input = json!({ "name": "Mug", "amount_cents": 500, "quantity": 2 });
        let item: Item = serde_json::from_value(input.clone()).unwrap();

        assert!(item.amount.is_none());
        assert_eq!(item.quantity, Some(2));
        assert_eq!(serde_json::to_value(&item).unwrap(), input);
    }

    #[test]
    fn amounts_accept_floats_and_numeric_strings() {
        for raw in [json!(2000), json!(2000.0), json!("2000"), json!(" 2000 "), json!(2000.9)] {
            let request: IntentionRequest =
                serde_json::from_value(json!({ "amount": raw })).unwrap();
            assert_eq!(request.amount, 2000, "amount {raw}");
        }

        let item: Item = serde_json::from_value(json!({ "amount": "350" })).unwrap();
        assert_eq!(item.amount, Some(350));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let err = serde_json::from_value::<IntentionRequest>(json!({ "amount": "lots" }))
            .unwrap_err();
        assert!(err.to_string().contains("invalid amount"));
        assert!(serde_json::from_value::<IntentionRequest>(json!({ "amount": true })).is_err());
    }
}
