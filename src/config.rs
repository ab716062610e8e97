//! Merchant configuration

use crate::types::{Currency, DEFAULT_BASE_URL};
use crate::{AaioError, Result};
use bon::bon;
use std::env;
use std::fmt;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials and settings of one merchant.
///
/// Only obtainable through [`AaioConfig::builder`], so a value always holds a
/// non-empty merchant id and first secret and a parseable base URL.
#[derive(Clone)]
pub struct AaioConfig {
    /// Merchant id from the AAIO cabinet
    pub(crate) merchant_id: String,
    /// First secret key, signs payment requests
    pub(crate) secret_1: String,
    /// Second secret key, verifies payment webhooks
    pub(crate) secret_2: Option<String>,
    /// API key, required by every `/api/*` call except the public ones
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: String,
    /// Used when a payment request doesn't name a currency
    pub(crate) default_currency: Currency,
    pub(crate) timeout: Duration,
}

fn from_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn missing(what: &str, var: &str) -> AaioError {
    AaioError::config(format!(
        "Missing required AAIO {what} configuration.\n\n\
         You can set it as an environment variable:\n\
         {var}=...\n\n\
         Or pass it directly to AaioConfig::builder()."
    ))
}

#[bon]
impl AaioConfig {
    /// Build a configuration. Every credential not passed explicitly is read
    /// from its `AAIO_*` environment variable unless `read_env` is `false`.
    #[builder]
    pub fn new(
        /// Merchant id, or `AAIO_MERCHANT_ID`
        merchant_id: Option<String>,
        /// First secret key, or `AAIO_SECRET_1`
        secret_1: Option<String>,
        /// Second secret key, or `AAIO_SECRET_2`
        secret_2: Option<String>,
        /// API key, or `AAIO_API_KEY`
        api_key: Option<String>,
        /// Base URL, or `AAIO_BASE_URL`, or `https://aaio.so`
        base_url: Option<String>,
        /// Defaults to RUB
        default_currency: Option<Currency>,
        /// Defaults to 30 seconds
        timeout: Option<Duration>,
        /// Fall back to `AAIO_*` environment variables. Defaults to `true`.
        read_env: Option<bool>,
    ) -> Result<Self> {
        let read_env = read_env.unwrap_or(true);
        let env_var = |name: &str| if read_env { from_env(name) } else { None };

        let merchant_id = merchant_id
            .filter(|v| !v.is_empty())
            .or_else(|| env_var("AAIO_MERCHANT_ID"))
            .ok_or_else(|| missing("merchant id", "AAIO_MERCHANT_ID"))?;

        let secret_1 = secret_1
            .filter(|v| !v.is_empty())
            .or_else(|| env_var("AAIO_SECRET_1"))
            .ok_or_else(|| missing("1st secret key", "AAIO_SECRET_1"))?;

        let secret_2 = secret_2
            .filter(|v| !v.is_empty())
            .or_else(|| env_var("AAIO_SECRET_2"));
        let api_key = api_key
            .filter(|v| !v.is_empty())
            .or_else(|| env_var("AAIO_API_KEY"));

        let base_url = base_url
            .or_else(|| env_var("AAIO_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url)?;

        Ok(AaioConfig {
            merchant_id,
            secret_1,
            secret_2,
            api_key,
            base_url,
            default_currency: default_currency.unwrap_or_default(),
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }

    /// Build a configuration purely from `AAIO_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_currency(&self) -> Currency {
        self.default_currency
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether payment webhooks can be verified with this configuration
    pub fn has_secret_2(&self) -> bool {
        self.secret_2.is_some()
    }

    /// Whether the `/api/*` calls are available with this configuration
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Second secret, or a configuration error
    pub fn require_secret_2(&self) -> Result<&str> {
        self.secret_2
            .as_deref()
            .ok_or_else(|| AaioError::config("2nd secret key is required for webhook validation"))
    }

    /// API key, or a configuration error
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AaioError::config("API key is required for this method"))
    }
}

impl fmt::Debug for AaioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("AaioConfig")
            .field("merchant_id", &self.merchant_id)
            .field("secret_1", &"<redacted>")
            .field("secret_2", &redact(&self.secret_2))
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("default_currency", &self.default_currency)
            .field("timeout", &self.timeout)
            .finish()
    }
}
