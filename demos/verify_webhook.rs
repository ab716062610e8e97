//! Verify a webhook body read from stdin.
//!
//! ```sh
//! AAIO_MERCHANT_ID=... AAIO_SECRET_1=... AAIO_SECRET_2=... \
//!     cargo run --example verify_webhook < payment.json
//! AAIO_PAYOFF_SECRET=... cargo run --example verify_webhook -- payoff < payoff.json
//! ```

use aaio::{AaioClient, PaymentWebhook, PayoffWebhook};
use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut body = Vec::new();
    std::io::stdin().read_to_end(&mut body)?;

    let valid = match std::env::args().nth(1).as_deref() {
        Some("payoff") => {
            let secret = std::env::var("AAIO_PAYOFF_SECRET")?;
            PayoffWebhook::from_json(&body)?.verify(&secret)?
        }
        _ => {
            let client = AaioClient::from_env()?;
            client.is_valid_payment_webhook(&PaymentWebhook::from_json(&body)?)?
        }
    };

    println!("{}", if valid { "valid" } else { "INVALID" });
    Ok(())
}
