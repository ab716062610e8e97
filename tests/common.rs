#![allow(dead_code)]

use aaio::{AaioClient, AaioConfig};

pub const MERCHANT_ID: &str = "1234";
pub const SECRET_1: &str = "first-secret";
pub const SECRET_2: &str = "second-secret";
pub const API_KEY: &str = "test-api-key";

/// Client pointed at a mock server, with every credential set
pub fn test_client(base_url: &str) -> AaioClient {
    let config = AaioConfig::builder()
        .merchant_id(MERCHANT_ID.to_string())
        .secret_1(SECRET_1.to_string())
        .secret_2(SECRET_2.to_string())
        .api_key(API_KEY.to_string())
        .base_url(base_url.to_string())
        .read_env(false)
        .build()
        .unwrap();
    AaioClient::new(config).unwrap()
}

/// Client pointed at a mock server, without an API key
pub fn public_client(base_url: &str) -> AaioClient {
    let config = AaioConfig::builder()
        .merchant_id(MERCHANT_ID.to_string())
        .secret_1(SECRET_1.to_string())
        .base_url(base_url.to_string())
        .read_env(false)
        .build()
        .unwrap();
    AaioClient::new(config).unwrap()
}
