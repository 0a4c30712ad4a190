//! Request and response types for the CloudPayments API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Currency every charge is made in
pub const CURRENCY: &str = "RUB";

/// A payment by card cryptogram
///
/// Nothing is validated locally; the provider reports invalid fields in a
/// `"Success": false` response.
#[derive(Clone, PartialEq)]
pub struct ChargeRequest {
    /// Amount in [`CURRENCY`]
    pub amount: Decimal,
    /// Card cryptogram produced by the payment SDK on the payer's device
    pub card_cryptogram_packet: String,
    /// Payer's IP address
    pub ip_address: String,
    /// Merchant order number, kept for the caller's bookkeeping; it is not
    /// part of the charge body or the idempotency key
    pub invoice_id: Option<String>,
    /// Payment purpose shown to the payer
    pub description: Option<String>,
}

impl std::fmt::Debug for ChargeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChargeRequest")
            .field("amount", &self.amount)
            .field(
                "card_cryptogram_packet",
                &mask_cryptogram(&self.card_cryptogram_packet),
            )
            .field("ip_address", &self.ip_address)
            .field("invoice_id", &self.invoice_id)
            .field("description", &self.description)
            .finish()
    }
}

impl ChargeRequest {
    /// Create a charge request
    pub fn new(
        amount: Decimal,
        card_cryptogram_packet: impl Into<String>,
        ip_address: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            card_cryptogram_packet: card_cryptogram_packet.into(),
            ip_address: ip_address.into(),
            invoice_id: None,
            description: None,
        }
    }

    /// Set the invoice id
    pub fn with_invoice_id(mut self, invoice_id: impl Into<String>) -> Self {
        self.invoice_id = Some(invoice_id.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wire body of `POST /payments/charge`
    pub fn body<'a>(&'a self, public_id: &'a str) -> ChargeBody<'a> {
        ChargeBody {
            amount: self.amount,
            ip_address: &self.ip_address,
            card_cryptogram_packet: &self.card_cryptogram_packet,
            currency: CURRENCY,
            description: self.description.as_deref(),
            public_id,
        }
    }
}

/// Wire body of `POST /payments/charge`
///
/// Always exactly six fields; `Description` is sent as `null` when absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChargeBody<'a> {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub ip_address: &'a str,
    pub card_cryptogram_packet: &'a str,
    pub currency: &'static str,
    pub description: Option<&'a str>,
    pub public_id: &'a str,
}

/// A response envelope exactly as the provider sent it
///
/// The only guarantee is a boolean `Success` field. Everything else is kept
/// as raw JSON; [`ApiResponse::outcome`] gives a typed view of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ApiResponse(Value);

impl TryFrom<Value> for ApiResponse {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value.get("Success") {
            Some(Value::Bool(_)) => Ok(Self(value)),
            Some(other) => Err(format!("`Success` is not a boolean: {}", other)),
            None => Err("missing `Success` flag".to_string()),
        }
    }
}

impl PartialEq<Value> for ApiResponse {
    fn eq(&self, other: &Value) -> bool {
        &self.0 == other
    }
}

impl ApiResponse {
    /// The provider's `Success` flag
    pub fn success(&self) -> bool {
        self.0
            .get("Success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// The provider's `Message`, if not null
    pub fn message(&self) -> Option<&str> {
        self.0.get("Message").and_then(Value::as_str)
    }

    /// The provider's `Model`, if not null
    pub fn model(&self) -> Option<&Value> {
        self.0.get("Model").filter(|model| !model.is_null())
    }

    /// The raw response body
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the raw response body
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Classify the response of a charge
    pub fn outcome(&self) -> serde_json::Result<ChargeOutcome> {
        let model = self.model();

        if self.success() {
            let transaction = Transaction::deserialize(model.unwrap_or(&Value::Null))?;
            return Ok(ChargeOutcome::Approved(transaction));
        }

        match model {
            Some(model) if model.get("AcsUrl").is_some() => Ok(ChargeOutcome::Secure3dRequired(
                Secure3dChallenge::deserialize(model)?,
            )),
            Some(model) if model.get("TransactionId").is_some() => Ok(ChargeOutcome::Declined(
                Transaction::deserialize(model)?,
            )),
            _ => Ok(ChargeOutcome::Rejected {
                message: self.message().map(str::to_string),
            }),
        }
    }
}

/// What happened to a charge, decoded from an [`ApiResponse`]
#[derive(Debug, Clone, PartialEq)]
pub enum ChargeOutcome {
    /// The payment went through
    Approved(Transaction),
    /// A transaction was created but declined, see
    /// [`Transaction::reason_code`]
    Declined(Transaction),
    /// The issuer requires 3-D Secure authentication before completing
    Secure3dRequired(Secure3dChallenge),
    /// The request was refused before a transaction was created, usually a
    /// validation error
    Rejected { message: Option<String> },
}

impl ChargeOutcome {
    /// Whether the payment went through
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved(_))
    }
}

/// Transaction fields callers commonly need; unknown fields are ignored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    pub transaction_id: i64,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub invoice_id: Option<String>,
    pub account_id: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub status_code: Option<i32>,
    pub reason: Option<String>,
    pub reason_code: Option<i32>,
    pub card_holder_message: Option<String>,
    pub auth_code: Option<String>,
    pub card_first_six: Option<String>,
    pub card_last_four: Option<String>,
    pub card_type: Option<String>,
    pub token: Option<String>,
    pub test_mode: Option<bool>,
}

/// Data needed to send the payer to their issuer's 3-D Secure page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Secure3dChallenge {
    pub transaction_id: i64,
    pub pa_req: String,
    pub acs_url: String,
    pub three_ds_callback_id: Option<String>,
}

/// Shorten a card cryptogram for logs and `Debug` output
pub(crate) fn mask_cryptogram(packet: &str) -> String {
    let prefix: String = packet.chars().take(8).collect();
    format!("{}...({} bytes)", prefix, packet.len())
}
