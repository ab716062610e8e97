//! Request and response models for the AAIO API

use crate::{AaioError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://aaio.so";

/// API paths, relative to the base URL
pub mod paths {
    pub const PAY: &str = "/merchant/pay";
    pub const GET_PAY_URL: &str = "/merchant/get_pay_url";
    pub const IPS: &str = "/api/public/ips";
    pub const PAYMENT_INFO: &str = "/api/info-pay";
    pub const BALANCE: &str = "/api/balance";
    pub const CREATE_PAYOFF: &str = "/api/create-payoff";
    pub const PAYOFF_SBP_BANKS: &str = "/api/sbp-banks-payoff";
    pub const PAYOFF_INFO: &str = "/api/info-payoff";
    pub const PAYOFF_RATES: &str = "/api/rates-payoff";
    pub const PAYOFF_METHODS: &str = "/api/methods-payoff";
    pub const PAYMENT_METHODS: &str = "/api/methods-pay";
}

/// Currencies a payment can be made in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Rub,
    Uah,
    Eur,
    Usd,
}

impl Currency {
    /// ISO code as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Uah => "UAH",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = AaioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "RUB" => Ok(Currency::Rub),
            "UAH" => Ok(Currency::Uah),
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(AaioError::config(format!("Unsupported currency: {other}"))),
        }
    }
}

/// Payment page language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ru,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }
}

/// Payment order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    InProcess,
    Success,
    Expired,
    Hold,
}

/// Payoff status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffStatus {
    InProcess,
    Cancel,
    Success,
}

/// Every API response is tagged with `"type": "success" | "error"`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success(T),
    Error(ApiErrorBody),
}

/// Body of an error envelope. The API does not always fill both fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Turn the envelope into a `Result`, mapping error envelopes to [`AaioError::BadRequest`]
    pub fn into_result(self) -> Result<T> {
        match self {
            ApiResponse::Success(value) => Ok(value),
            ApiResponse::Error(body) => Err(AaioError::bad_request(body.code, body.message)),
        }
    }
}

/// Parameters of a new payment order
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Amount in `currency`
    pub amount: Decimal,
    /// Merchant-side order id
    pub order_id: String,
    pub description: Option<String>,
    /// Preferred payment method; the customer can still change it
    pub method: Option<String>,
    pub email: Option<String>,
    /// Referral code stored in the customer's cookies
    pub referral: Option<String>,
    /// Custom value echoed back in the webhook
    pub us_key: Option<String>,
    /// Falls back to the client's default currency
    pub currency: Option<Currency>,
    pub language: Option<Language>,
}

impl PaymentRequest {
    pub fn new(amount: Decimal, order_id: impl Into<String>) -> Self {
        Self {
            amount,
            order_id: order_id.into(),
            description: None,
            method: None,
            email: None,
            referral: None,
            us_key: None,
            currency: None,
            language: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_referral(mut self, referral: impl Into<String>) -> Self {
        self.referral = Some(referral.into());
        self
    }

    pub fn with_us_key(mut self, us_key: impl Into<String>) -> Self {
        self.us_key = Some(us_key.into());
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

/// Parameters of a new payoff (withdrawal)
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffRequest {
    /// Payoff method code, see [`crate::AaioClient::payoff_methods`]
    pub method: String,
    pub amount: Decimal,
    /// Destination wallet, card or phone number
    pub wallet: String,
    /// Merchant-side payoff id
    pub payoff_id: Option<String>,
    /// `0` or `1`, see the vendor documentation for which side pays the commission
    pub commission_type: u8,
}

impl PayoffRequest {
    pub fn new(method: impl Into<String>, amount: Decimal, wallet: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            amount,
            wallet: wallet.into(),
            payoff_id: None,
            commission_type: 0,
        }
    }

    pub fn with_payoff_id(mut self, payoff_id: impl Into<String>) -> Self {
        self.payoff_id = Some(payoff_id.into());
        self
    }

    pub fn with_commission_type(mut self, commission_type: u8) -> Self {
        self.commission_type = commission_type;
        self
    }
}

/// How to look a payoff up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayoffLookup {
    /// By the merchant-side id passed at creation
    ByMyId(String),
    /// By the AAIO-side id
    ById(String),
}

impl PayoffLookup {
    pub(crate) fn param(&self) -> (&'static str, &str) {
        match self {
            PayoffLookup::ByMyId(id) => ("my_id", id),
            PayoffLookup::ById(id) => ("id", id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PayUrl {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Listing<T> {
    pub list: T,
}

/// Payment order as reported by `/api/info-pay`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentInfo {
    pub id: String,
    pub order_id: String,
    #[serde(default)]
    pub desc: Option<String>,
    pub merchant_id: String,
    #[serde(default)]
    pub merchant_domain: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    pub amount: Decimal,
    pub currency: Currency,
    #[serde(default)]
    pub profit: Option<Decimal>,
    #[serde(default)]
    pub commission: Option<Decimal>,
    #[serde(default)]
    pub commission_client: Option<Decimal>,
    #[serde(default)]
    pub commission_type: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub status: PaymentStatus,
    pub date: String,
    #[serde(default)]
    pub expired_date: Option<String>,
    #[serde(default)]
    pub complete_date: Option<String>,
    /// Custom parameters, passed through untouched
    #[serde(default)]
    pub us_vars: Option<Value>,
}

/// Account balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Balance {
    pub balance: Decimal,
    pub referral: Decimal,
    pub hold: Decimal,
}

/// Payoff as returned right after creation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedPayoff {
    pub id: String,
    #[serde(default)]
    pub my_id: Option<String>,
    pub method: String,
    pub wallet: String,
    pub amount: Decimal,
    pub amount_in_currency: Decimal,
    pub amount_currency: String,
    pub amount_rate: Decimal,
    /// Net amount after commission
    pub amount_down: Decimal,
    pub commission: Decimal,
    pub commission_type: u8,
    pub status: PayoffStatus,
}

/// Payoff as reported by `/api/info-payoff`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayoffInfo {
    pub id: String,
    #[serde(default)]
    pub my_id: Option<String>,
    pub method: String,
    pub wallet: String,
    pub amount: Decimal,
    pub amount_down: Decimal,
    pub commission: Decimal,
    pub commission_type: u8,
    pub status: PayoffStatus,
    #[serde(default)]
    pub cancel_message: Option<String>,
    pub date: String,
    #[serde(default)]
    pub complete_date: Option<String>,
}

/// Bank available for SBP payoffs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbpBank {
    pub bank_id: String,
    pub bank_name: String,
    #[serde(default)]
    pub bank_icon: Option<String>,
}

/// Payoff exchange rates against RUB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct PayoffRates {
    pub usd: Decimal,
    pub uah: Decimal,
    pub usdt: Decimal,
    pub btc: Decimal,
}

/// Payoff method limits and fees
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayoffMethod {
    pub name: String,
    pub min: Decimal,
    pub max: Decimal,
    pub commission_percent: Decimal,
    pub commission_sum: Decimal,
}

/// Payment method limits, keyed by currency code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentMethod {
    pub name: String,
    pub min: HashMap<String, Decimal>,
    pub max: HashMap<String, Decimal>,
    pub commission_type: Decimal,
}

impl PaymentMethod {
    /// Minimum amount in `currency`, if the method accepts it
    pub fn min_for(&self, currency: Currency) -> Option<Decimal> {
        self.min.get(currency.as_str()).copied()
    }

    /// Maximum amount in `currency`, if the method accepts it
    pub fn max_for(&self, currency: Currency) -> Option<Decimal> {
        self.max.get(currency.as_str()).copied()
    }

    /// Whether `amount` fits the limits of this method
    pub fn accepts(&self, amount: Decimal, currency: Currency) -> bool {
        match (self.min_for(currency), self.max_for(currency)) {
            (Some(min), Some(max)) => amount >= min && amount <= max,
            _ => false,
        }
    }
}
