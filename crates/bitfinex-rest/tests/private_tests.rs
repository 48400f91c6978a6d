//! Integration tests for authenticated v1 endpoints

mod common;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bitfinex_auth::sign_payload;
use bitfinex_rest::{BitfinexClient, ClientConfig, RestError};
use common::*;
use serde_json::{json, Value};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Decoded payloads of every request the server received
async fn received_payloads(server: &MockServer) -> Vec<(Value, String, String)> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .map(|request| {
            let header_value = |name: &str| {
                request
                    .headers
                    .get(name)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string)
                    .expect("auth header present")
            };

            let encoded = header_value("x-bfx-payload");
            let signature = header_value("x-bfx-signature");
            let decoded = BASE64.decode(&encoded).expect("payload is base64");
            let payload: Value = serde_json::from_slice(&decoded).expect("payload is JSON");

            (payload, encoded, signature)
        })
        .collect()
}

#[tokio::test]
async fn test_balances_sends_verifiable_signature() {
    let server = setup_mock_server().await;
    let balances = json!([
        {"type": "exchange", "currency": "btc", "amount": "0.5", "available": "0.5"}
    ]);

    Mock::given(method("POST"))
        .and(path("/v1/balances"))
        .and(header("X-BFX-APIKEY", TEST_KEY))
        .and(header_exists("X-BFX-SIGNATURE"))
        .and(header_exists("X-BFX-PAYLOAD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(balances.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    assert_eq!(client.balances().await.unwrap(), balances);

    let payloads = received_payloads(&server).await;
    let (payload, encoded, signature) = &payloads[0];

    assert_eq!(payload["request"], "/v1/balances");
    assert!(payload["nonce"].as_str().unwrap().parse::<u64>().is_ok());
    assert_eq!(signature, &sign_payload(TEST_SECRET, encoded).unwrap());

    // Body carries the same payload as the header
    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(&body, payload);
}

#[tokio::test]
async fn test_nonce_increases_between_calls() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = auth_client(&server);
    client.account_infos().await.unwrap();
    client.summary().await.unwrap();
    client.clone().key_info().await.unwrap();

    let nonces: Vec<u64> = received_payloads(&server)
        .await
        .iter()
        .map(|(payload, _, _)| payload["nonce"].as_str().unwrap().parse().unwrap())
        .collect();

    assert_eq!(nonces.len(), 3);
    assert!(nonces.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn test_my_trades_includes_parameters() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/v1/mytrades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = auth_client(&server);
    assert_eq!(client.my_trades("btcusd", Some(10)).await.unwrap(), json!([]));

    let payloads = received_payloads(&server).await;
    let (payload, _, _) = &payloads[0];
    assert_eq!(payload["request"], "/v1/mytrades");
    assert_eq!(payload["symbol"], "btcusd");
    assert_eq!(payload["limit_trades"], 10);
}

#[tokio::test]
async fn test_missing_credentials_fail_before_io() {
    let server = setup_mock_server().await;
    let client = public_client(&server);

    let result = client.balances().await;
    assert!(matches!(result, Err(RestError::MissingCredentials)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_key_surfaces_api_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/v1/key_info"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid X-BFX-SIGNATURE"})),
        )
        .mount(&server)
        .await;

    let config = config_for(&server).with_key("wrong-key").with_secret("wrong-secret");
    let client = BitfinexClient::with_config(config).unwrap();

    let err = client.key_info().await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(!err.to_string().contains("wrong-secret"));
}

#[tokio::test]
async fn test_nonce_multiplier_scales_nonce() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let plain = auth_client(&server);
    plain.summary().await.unwrap();

    let config: ClientConfig = config_for(&server)
        .with_key(TEST_KEY)
        .with_secret(TEST_SECRET)
        .with_nonce_multiplier(1000.0);
    let scaled = BitfinexClient::with_config(config).unwrap();
    scaled.summary().await.unwrap();

    let nonces: Vec<u64> = received_payloads(&server)
        .await
        .iter()
        .map(|(payload, _, _)| payload["nonce"].as_str().unwrap().parse().unwrap())
        .collect();

    assert!(nonces[1] > nonces[0] * 100);
}
