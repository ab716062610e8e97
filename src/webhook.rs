//! Inbound webhook payloads
//!
//! Both payloads are decoded once per notification, verified with
//! [`crate::signature`], and dropped.

use crate::signature::{verify_payment_webhook, verify_payoff_webhook};
use crate::types::{Currency, PayoffStatus};
use crate::{AaioError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use std::str::FromStr;

/// Decode an amount from the exact text of its JSON token.
///
/// The signature is computed over that text, so `150.50` must stay `150.50`
/// whether it arrives as a string or as a number.
fn exact_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Box<RawValue> = Deserialize::deserialize(deserializer)?;
    let token = raw.get().trim();
    let text = token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token);

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| serde::de::Error::custom(format!("invalid amount: {token}")))
}

/// Notification sent when a payment order is paid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentWebhook {
    pub merchant_id: String,
    pub invoice_id: String,
    pub order_id: String,
    #[serde(deserialize_with = "exact_amount")]
    pub amount: Decimal,
    pub currency: Currency,
    pub profit: Decimal,
    pub commission: Decimal,
    pub commission_client: Decimal,
    pub commission_type: String,
    pub sign: String,
    pub method: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub us_key: String,
}

impl PaymentWebhook {
    /// Decode a JSON webhook body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| AaioError::validation(format!("Malformed payment webhook: {e}")))
    }

    /// Check the fields the signature depends on are present
    pub fn validate(&self) -> Result<()> {
        if self.order_id.is_empty() {
            return Err(AaioError::validation("payment webhook is missing order_id"));
        }
        if self.sign.is_empty() {
            return Err(AaioError::validation("payment webhook is missing sign"));
        }
        Ok(())
    }

    /// See [`verify_payment_webhook`]
    pub fn verify(&self, merchant_id: &str, second_secret: &str) -> Result<bool> {
        verify_payment_webhook(self, merchant_id, second_secret)
    }
}

/// Notification sent when a payoff reaches a final status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffWebhook {
    pub id: String,
    pub my_id: String,
    pub method: String,
    pub bank: String,
    pub wallet: String,
    /// Gross amount
    pub amount: Decimal,
    pub amount_in_currency: Decimal,
    pub amount_currency: String,
    pub amount_rate: Decimal,
    /// Net amount after commission. This, not `amount`, is what gets signed.
    #[serde(deserialize_with = "exact_amount")]
    pub amount_down: Decimal,
    pub commission: Decimal,
    /// Either 0 or 1; anything else fails [`PayoffWebhook::validate`]
    pub commission_type: u8,
    pub status: PayoffStatus,
    #[serde(default)]
    pub cancel_message: Option<String>,
    pub date: String,
    pub complete_date: String,
    pub sign: String,
}

impl PayoffWebhook {
    /// Decode a JSON webhook body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| AaioError::validation(format!("Malformed payoff webhook: {e}")))
    }

    /// Check the fields the signature depends on are present
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(AaioError::validation("payoff webhook is missing id"));
        }
        if self.sign.is_empty() {
            return Err(AaioError::validation("payoff webhook is missing sign"));
        }
        if self.commission_type > 1 {
            return Err(AaioError::validation(format!(
                "payoff webhook has unknown commission_type {}; expected 0 or 1",
                self.commission_type
            )));
        }
        Ok(())
    }

    /// See [`verify_payoff_webhook`]
    pub fn verify(&self, secret_key: &str) -> Result<bool> {
        verify_payoff_webhook(self, secret_key)
    }
}
