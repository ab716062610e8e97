//! Request signing and webhook signature verification
//!
//! Every signature the API deals with is the lowercase hex SHA-256 digest of
//! a handful of fields joined with `:`. Which fields, and in which order,
//! depends on the direction:
//!
//! | direction        | signed string                                  |
//! |------------------|------------------------------------------------|
//! | payment request  | `merchant_id:amount:currency:secret_1:order_id` |
//! | payment webhook  | `merchant_id:amount:secret_2:order_id`          |
//! | payoff webhook   | `id:secret:amount_down`                         |
//!
//! Amounts always go through [`format_amount`] so that the string we hash is
//! byte-for-byte the string we send (or received).

use crate::webhook::{PaymentWebhook, PayoffWebhook};
use crate::{AaioError, Result};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// Length of a hex-encoded SHA-256 digest
pub const SIGNATURE_LEN: usize = 64;

/// Hex-encoded SHA-256 signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    fn digest(parts: &[&str]) -> Self {
        let hash = Sha256::digest(parts.join(":").as_bytes());
        Self(hex::encode(hash))
    }

    /// Borrow the hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the signature, returning the hex string
    pub fn into_string(self) -> String {
        self.0
    }

    /// Constant-time comparison against a signature received over the wire
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonical wire form of an amount.
///
/// Never uses an exponent or a locale separator and keeps the scale the value
/// was built with, so `150.50` stays `150.50` and `100` stays `100`.
pub fn format_amount(amount: &Decimal) -> String {
    amount.to_string()
}

/// Sign an outbound payment request
pub fn sign(
    merchant_id: &str,
    amount: &Decimal,
    order_id: &str,
    currency: &str,
    secret: &str,
) -> Signature {
    let amount = format_amount(amount);
    Signature::digest(&[merchant_id, &amount, currency, secret, order_id])
}

/// Inputs of a payment request signature
#[derive(Clone, PartialEq, Eq)]
pub struct SigningContext {
    pub merchant_id: String,
    pub secret: String,
    pub currency: String,
    pub order_id: String,
    pub amount: Decimal,
}

impl SigningContext {
    pub fn new(
        merchant_id: impl Into<String>,
        secret: impl Into<String>,
        currency: impl Into<String>,
        order_id: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            secret: secret.into(),
            currency: currency.into(),
            order_id: order_id.into(),
            amount,
        }
    }

    /// Compute the signature for this request
    pub fn sign(&self) -> Signature {
        sign(
            &self.merchant_id,
            &self.amount,
            &self.order_id,
            &self.currency,
            &self.secret,
        )
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("merchant_id", &self.merchant_id)
            .field("secret", &"<redacted>")
            .field("currency", &self.currency)
            .field("order_id", &self.order_id)
            .field("amount", &self.amount)
            .finish()
    }
}

fn require_secret<'a>(secret: &'a str, what: &str) -> Result<&'a str> {
    if secret.is_empty() {
        return Err(AaioError::config(format!(
            "{what} is required for webhook validation"
        )));
    }
    Ok(secret)
}

/// Expected signature of a payment webhook
pub fn payment_webhook_signature(
    payload: &PaymentWebhook,
    merchant_id: &str,
    second_secret: &str,
) -> Result<Signature> {
    let second_secret = require_secret(second_secret, "2nd secret key")?;
    if merchant_id.is_empty() {
        return Err(AaioError::config("merchant id is required for webhook validation"));
    }
    payload.validate()?;

    let amount = format_amount(&payload.amount);
    Ok(Signature::digest(&[
        merchant_id,
        &amount,
        second_secret,
        &payload.order_id,
    ]))
}

/// Expected signature of a payoff webhook. Signed over the net `amount_down`.
pub fn payoff_webhook_signature(payload: &PayoffWebhook, secret_key: &str) -> Result<Signature> {
    let secret_key = require_secret(secret_key, "secret key")?;
    payload.validate()?;

    let amount_down = format_amount(&payload.amount_down);
    Ok(Signature::digest(&[&payload.id, secret_key, &amount_down]))
}

/// Check that a payment webhook was signed with our second secret.
///
/// A mismatch is `Ok(false)`; errors are reserved for missing secrets and
/// incomplete payloads.
pub fn verify_payment_webhook(
    payload: &PaymentWebhook,
    merchant_id: &str,
    second_secret: &str,
) -> Result<bool> {
    let expected = payment_webhook_signature(payload, merchant_id, second_secret)?;
    let valid = expected.matches(&payload.sign);
    if valid {
        debug!(order_id = %payload.order_id, "payment webhook signature verified");
    } else {
        warn!(order_id = %payload.order_id, "payment webhook signature mismatch");
    }
    Ok(valid)
}

/// Check that a payoff webhook was signed with `secret_key`
pub fn verify_payoff_webhook(payload: &PayoffWebhook, secret_key: &str) -> Result<bool> {
    let expected = payoff_webhook_signature(payload, secret_key)?;
    let valid = expected.matches(&payload.sign);
    if valid {
        debug!(payoff_id = %payload.id, "payoff webhook signature verified");
    } else {
        warn!(payoff_id = %payload.id, "payoff webhook signature mismatch");
    }
    Ok(valid)
}
