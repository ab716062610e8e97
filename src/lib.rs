//! # aaio - AAIO payment API client
//!
//! Async client for the [AAIO](https://aaio.so) merchant API: payment
//! orders, payoffs, balances and rates, plus the SHA-256 signing used for
//! outbound payment requests and inbound webhooks.
//!
//! ```no_run
//! use aaio::{AaioClient, AaioConfig, PaymentRequest};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> aaio::Result<()> {
//! let config = AaioConfig::builder()
//!     .merchant_id("1234".to_string())
//!     .secret_1("first-secret".to_string())
//!     .build()?;
//! let client = AaioClient::new(config)?;
//!
//! let _url = client
//!     .get_pay_url(&PaymentRequest::new(Decimal::from(100), "order-1"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod signature;
pub mod types;
pub mod webhook;

// Re-exports for convenience
pub use client::AaioClient;
pub use config::AaioConfig;
pub use error::{AaioError, Result};
pub use signature::{
    format_amount, sign, verify_payment_webhook, verify_payoff_webhook, Signature,
    SigningContext,
};
pub use types::*;
pub use webhook::{PaymentWebhook, PayoffWebhook};

/// Current version of the aaio library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_paths() {
        assert_eq!(paths::GET_PAY_URL, "/merchant/get_pay_url");
        assert_eq!(paths::PAYOFF_INFO, "/api/info-payoff");
        assert_eq!(DEFAULT_BASE_URL, "https://aaio.so");
    }
}
