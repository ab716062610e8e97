//! HTTP client for the AAIO merchant API

use crate::config::AaioConfig;
use crate::signature::{format_amount, sign};
use crate::types::*;
use crate::webhook::PaymentWebhook;
use crate::{AaioError, Result};
use http::header::{HeaderName, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, warn};
use url::Url;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Client bound to one merchant.
///
/// Owns a single `reqwest::Client` for its whole lifetime; the connection
/// pool is released when the last clone is dropped. The API key is attached
/// to API calls only, never to pages outside the API.
#[derive(Debug, Clone)]
pub struct AaioClient {
    config: AaioConfig,
    client: Client,
    api_key: Option<HeaderValue>,
}

impl AaioClient {
    /// Create a client for `config`
    pub fn new(config: AaioConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(|key| {
                let mut value = HeaderValue::from_str(key)
                    .map_err(|e| AaioError::config(format!("Invalid API key: {e}")))?;
                value.set_sensitive(true);
                Ok::<_, AaioError>(value)
            })
            .transpose()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AaioError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            client,
            api_key,
        })
    }

    /// Create a client from `AAIO_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(AaioConfig::from_env()?)
    }

    /// Get the configuration
    pub fn config(&self) -> &AaioConfig {
        &self.config
    }

    fn join_url(&self, path: &str) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }

    /// Signed query parameters of a payment order, unset optional fields left out
    fn payment_params(&self, request: &PaymentRequest) -> Vec<(&'static str, String)> {
        let currency = request.currency.unwrap_or(self.config.default_currency);
        let signature = sign(
            &self.config.merchant_id,
            &request.amount,
            &request.order_id,
            currency.as_str(),
            &self.config.secret_1,
        );

        let mut params = vec![
            ("merchant_id", self.config.merchant_id.clone()),
            ("amount", format_amount(&request.amount)),
            ("currency", currency.as_str().to_string()),
            ("order_id", request.order_id.clone()),
            ("sign", signature.into_string()),
        ];

        let optional = [
            ("desc", request.description.as_deref()),
            ("lang", request.language.as_ref().map(Language::as_str)),
            ("method", request.method.as_deref()),
            ("email", request.email.as_deref()),
            ("referral", request.referral.as_deref()),
            ("us_key", request.us_key.as_deref()),
        ];
        params.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v.to_string()))),
        );

        params
    }

    /// Build the payment page URL locally, without calling the API
    pub fn payment_url(&self, request: &PaymentRequest) -> Result<String> {
        let params = self.payment_params(request);
        let mut url = self.join_url(paths::PAY)?;
        url.query_pairs_mut().extend_pairs(params.iter());
        Ok(url.into())
    }

    /// Register a payment order and return the payment page URL
    pub async fn get_pay_url(&self, request: &PaymentRequest) -> Result<String> {
        let params = self.payment_params(request);
        let response: PayUrl = self.post(paths::GET_PAY_URL, &params).await?;
        Ok(response.url)
    }

    /// Addresses webhooks are sent from
    pub async fn get_ips(&self) -> Result<Vec<String>> {
        let response: Listing<Vec<String>> = self.post(paths::IPS, &[]).await?;
        Ok(response.list)
    }

    /// Look up a payment order by merchant order id
    pub async fn payment_info(&self, order_id: &str) -> Result<PaymentInfo> {
        self.config.require_api_key()?;
        let params = [
            ("merchant_id", self.config.merchant_id.clone()),
            ("order_id", order_id.to_string()),
        ];
        self.post(paths::PAYMENT_INFO, &params).await
    }

    /// Account balances
    pub async fn balances(&self) -> Result<Balance> {
        self.config.require_api_key()?;
        self.post(paths::BALANCE, &[]).await
    }

    /// Request a payoff
    pub async fn create_payoff(&self, request: &PayoffRequest) -> Result<CreatedPayoff> {
        self.config.require_api_key()?;
        let mut params = vec![
            ("method", request.method.clone()),
            ("amount", format_amount(&request.amount)),
            ("wallet", request.wallet.clone()),
            ("commission_type", request.commission_type.to_string()),
        ];
        if let Some(payoff_id) = &request.payoff_id {
            params.push(("my_id", payoff_id.clone()));
        }
        self.post(paths::CREATE_PAYOFF, &params).await
    }

    /// Banks available for SBP payoffs
    pub async fn payoff_sbp_banks(&self) -> Result<Vec<SbpBank>> {
        self.config.require_api_key()?;
        let response: Listing<Vec<SbpBank>> = self.post(paths::PAYOFF_SBP_BANKS, &[]).await?;
        Ok(response.list)
    }

    /// Look up a payoff
    pub async fn payoff_info(&self, lookup: &PayoffLookup) -> Result<PayoffInfo> {
        self.config.require_api_key()?;
        let (key, id) = lookup.param();
        self.post(paths::PAYOFF_INFO, &[(key, id.to_string())]).await
    }

    /// Current payoff exchange rates
    pub async fn payoff_rates(&self) -> Result<PayoffRates> {
        self.config.require_api_key()?;
        self.post(paths::PAYOFF_RATES, &[]).await
    }

    /// Payoff methods keyed by method code
    pub async fn payoff_methods(&self) -> Result<HashMap<String, PayoffMethod>> {
        self.config.require_api_key()?;
        let response: Listing<HashMap<String, PayoffMethod>> =
            self.post(paths::PAYOFF_METHODS, &[]).await?;
        Ok(response.list)
    }

    /// Payment methods enabled for this merchant, keyed by method code
    pub async fn payment_methods(&self) -> Result<HashMap<String, PaymentMethod>> {
        self.config.require_api_key()?;
        let params = [("merchant_id", self.config.merchant_id.clone())];
        let response: Listing<HashMap<String, PaymentMethod>> =
            self.post(paths::PAYMENT_METHODS, &params).await?;
        Ok(response.list)
    }

    /// Follow a payment URL's redirects and return where it lands.
    ///
    /// The request carries no credentials: the redirect chain ends on hosts
    /// outside the API.
    pub async fn resolve_invoice_url(&self, payment_url: &str) -> Result<String> {
        let url = Url::parse(payment_url)?;
        debug!(%url, "resolving invoice url");
        let response = self.client.get(url).send().await?;
        Ok(response.url().to_string())
    }

    /// Check a payment webhook against the configured merchant id and second secret
    pub fn is_valid_payment_webhook(&self, webhook: &PaymentWebhook) -> Result<bool> {
        let secret_2 = self.config.require_secret_2()?;
        webhook.verify(&self.config.merchant_id, secret_2)
    }

    /// Form-encoded POST, decoding the response envelope
    async fn post<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.join_url(path)?;
        debug!(%path, "sending AAIO request");

        let mut request = self
            .client
            .post(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .form(params);
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<ApiResponse<T>>(&body) {
            Ok(envelope) => envelope.into_result().inspect_err(|e| {
                warn!(%path, status = status.as_u16(), error = %e, "AAIO rejected request");
            }),
            Err(e) if status.is_success() => Err(AaioError::from(e)),
            Err(_) => Err(AaioError::unexpected_response(
                status.as_u16(),
                String::from_utf8_lossy(&body),
            )),
        }
    }
}
