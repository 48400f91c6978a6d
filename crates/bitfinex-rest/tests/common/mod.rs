//! Common test utilities and fixtures for integration tests
//!
//! Fixtures mirror payloads returned by the live Bitfinex API.

#![allow(dead_code)]

use bitfinex_rest::{BitfinexClient, ClientConfig};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_KEY: &str = "test-api-key";
pub const TEST_SECRET: &str = "test-api-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Public-only client pointed at the mock server
pub fn public_client(server: &MockServer) -> BitfinexClient {
    BitfinexClient::with_config(config_for(server)).expect("client should build")
}

/// Authenticated client pointed at the mock server
pub fn auth_client(server: &MockServer) -> BitfinexClient {
    let config = config_for(server).with_key(TEST_KEY).with_secret(TEST_SECRET);
    BitfinexClient::with_config(config).expect("client should build")
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(2))
        .without_env()
}

/// `GET /v1/today/BTCUSD`
pub fn today_btcusd() -> Value {
    json!({"low": "6327.1", "high": "6711.0", "volume": "29054.15345665"})
}

/// `GET /v1/pubticker/btcusd`
pub fn pubticker_btcusd() -> Value {
    json!({
        "ask": "6689.7",
        "bid": "6689.6",
        "high": "6771.0",
        "last_price": "6689.6",
        "low": "6576.9",
        "mid": "6689.65",
        "timestamp": "1531828672.2591913",
        "volume": "22255.610510320003"
    })
}

/// One trading pair element of `GET /v2/tickers`
pub fn trading_pair_ticker() -> Value {
    json!(["tBTCUSD", 7381.6, 37.5, 7381.7, 64.1, -103.2, -0.0138, 7381.6, 21785.6, 7543.5, 7301])
}

/// One funding currency element of `GET /v2/tickers`
pub fn funding_currency_ticker() -> Value {
    json!([
        "fUSD", 0.000_265_75, 0.000_24, 2, 1_325_426.5, 0.000_264_99, 2, 84_524.2,
        0.000_003_1, 0.0118, 0.000_265, 183_245_432.1, 0.000_34, 0.000_2
    ])
}
