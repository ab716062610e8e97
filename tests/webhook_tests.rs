//! Webhook verification through the public API

mod common;

use aaio::{
    sign, verify_payment_webhook, AaioConfig, AaioClient, AaioError, PaymentWebhook,
    PayoffWebhook, SigningContext,
};
use common::*;
use rust_decimal::Decimal;
use serde_json::json;

const PAYMENT_SIGN: &str = "315ca92bdf3c26fb14846af5ca3e3bca85d300d63370c7595b0dce07fed70c65";
const PAYOFF_SIGN: &str = "ecfbb10167dbae8202124e1addcd5e08c0f24d1fd59121877de5dbb7e8ec2b5a";

fn payment_body(sign: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "merchant_id": MERCHANT_ID,
        "invoice_id": "a1b2c3",
        "order_id": "order-42",
        "amount": "150.50",
        "currency": "RUB",
        "profit": "145.00",
        "commission": "5.50",
        "commission_client": "0.00",
        "commission_type": "merchant",
        "sign": sign,
        "method": "cards_ru",
        "desc": "Premium",
        "email": "buyer@example.com",
        "us_key": "user-99"
    }))
    .unwrap()
}

fn payoff_body(amount_down: u64) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "id": "9f1c-payoff",
        "my_id": "payoff-1",
        "method": "sbp",
        "bank": "100000000111",
        "wallet": "79000000000",
        "amount": 100,
        "amount_in_currency": 100,
        "amount_currency": "RUB",
        "amount_rate": 1,
        "amount_down": amount_down,
        "commission": 3,
        "commission_type": 0,
        "status": "success",
        "date": "2024-01-01 12:00:00",
        "complete_date": "2024-01-01 12:05:00",
        "sign": PAYOFF_SIGN
    }))
    .unwrap()
}

#[test]
fn test_client_verifies_payment_webhook() {
    let client = test_client("https://aaio.so");
    let webhook = PaymentWebhook::from_json(&payment_body(PAYMENT_SIGN)).unwrap();

    assert!(client.is_valid_payment_webhook(&webhook).unwrap());
}

#[test]
fn test_client_rejects_forged_payment_webhook() {
    let client = test_client("https://aaio.so");
    let forged = "0".repeat(64);
    let webhook = PaymentWebhook::from_json(&payment_body(&forged)).unwrap();

    assert!(!client.is_valid_payment_webhook(&webhook).unwrap());
}

#[test]
fn test_client_without_second_secret_fails_fast() {
    let client = public_client("https://aaio.so");
    let webhook = PaymentWebhook::from_json(&payment_body(PAYMENT_SIGN)).unwrap();

    assert!(matches!(
        client.is_valid_payment_webhook(&webhook),
        Err(AaioError::Config { .. })
    ));
}

#[test]
fn test_empty_second_secret_is_config_error() {
    let webhook = PaymentWebhook::from_json(&payment_body(PAYMENT_SIGN)).unwrap();

    match verify_payment_webhook(&webhook, MERCHANT_ID, "") {
        Err(AaioError::Config { message }) => assert!(!message.is_empty()),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_tampered_amount_fails_verification() {
    let mut webhook = PaymentWebhook::from_json(&payment_body(PAYMENT_SIGN)).unwrap();
    webhook.amount = Decimal::new(15051, 2);

    assert!(!verify_payment_webhook(&webhook, MERCHANT_ID, SECRET_2).unwrap());
}

#[test]
fn test_payment_signature_is_not_a_webhook_signature() {
    // A request signature uses the first secret and includes the currency
    let request_sign = sign(
        MERCHANT_ID,
        &Decimal::new(15050, 2),
        "order-42",
        "RUB",
        SECRET_1,
    );
    let webhook = PaymentWebhook::from_json(&payment_body(request_sign.as_str())).unwrap();

    assert!(!webhook.verify(MERCHANT_ID, SECRET_2).unwrap());
}

#[test]
fn test_payoff_webhook_asymmetry() {
    let net = PayoffWebhook::from_json(&payoff_body(97)).unwrap();
    assert!(net.verify("payout-secret").unwrap());

    let gross = PayoffWebhook::from_json(&payoff_body(100)).unwrap();
    assert!(!gross.verify("payout-secret").unwrap());
}

#[test]
fn test_malformed_webhook_body() {
    assert!(matches!(
        PaymentWebhook::from_json(b"merchant_id=1234&amount=100"),
        Err(AaioError::Validation { .. })
    ));
    assert!(matches!(
        PayoffWebhook::from_json(b"{}"),
        Err(AaioError::Validation { .. })
    ));
}

#[test]
fn test_signing_context_fixed_vector() {
    let ctx = SigningContext::new("1234", "topsecret", "RUB", "order1", Decimal::from(100));
    assert_eq!(
        ctx.sign().to_string(),
        "cdf160362cd34f30c027ca1c8260fb03d7acbd6fee28f8b1ef48749265714995"
    );
}

#[test]
fn test_clones_share_configuration() {
    let config = AaioConfig::builder()
        .merchant_id(MERCHANT_ID.to_string())
        .secret_1(SECRET_1.to_string())
        .secret_2(SECRET_2.to_string())
        .base_url("https://aaio.so".to_string())
        .read_env(false)
        .build()
        .unwrap();
    let client = AaioClient::new(config).unwrap();
    let clone = client.clone();
    drop(client);

    let webhook = PaymentWebhook::from_json(&payment_body(PAYMENT_SIGN)).unwrap();
    assert!(clone.is_valid_payment_webhook(&webhook).unwrap());
}
