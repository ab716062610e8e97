//! Create a payment order and print its payment page URL.
//!
//! ```sh
//! AAIO_MERCHANT_ID=... AAIO_SECRET_1=... cargo run --example create_payment -- 150.50 order-42
//! ```

use aaio::{AaioClient, Language, PaymentRequest};
use rust_decimal::Decimal;
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let amount = Decimal::from_str(&args.next().unwrap_or_else(|| "100".to_string()))?;
    let order_id = args.next().unwrap_or_else(|| "demo-order-1".to_string());

    let client = AaioClient::from_env()?;
    let request = PaymentRequest::new(amount, order_id)
        .with_description("Demo payment")
        .with_language(Language::En);

    println!("Local URL: {}", client.payment_url(&request)?);

    match client.get_pay_url(&request).await {
        Ok(url) => println!("Payment page: {}", url),
        Err(e) => eprintln!("Failed to register payment: {}", e),
    }

    Ok(())
}
