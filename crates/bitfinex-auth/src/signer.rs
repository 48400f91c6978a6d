//! Payload signing for Bitfinex authenticated endpoints
//!
//! Bitfinex signature algorithm:
//! 1. Serialize the payload to JSON
//! 2. Base64 encode the JSON bytes
//! 3. HMAC-SHA384(secret, base64 payload)
//! 4. Hex encode result

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha384;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

type HmacSha384 = Hmac<Sha384>;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-BFX-APIKEY";
/// Header carrying the hex signature
pub const SIGNATURE_HEADER: &str = "X-BFX-SIGNATURE";
/// Header carrying the base64 payload
pub const PAYLOAD_HEADER: &str = "X-BFX-PAYLOAD";

/// Serialize a payload to JSON and base64 encode it
pub fn encode_payload<T: Serialize + ?Sized>(payload: &T) -> AuthResult<String> {
    let json = serde_json::to_string(payload)?;
    Ok(BASE64.encode(json.as_bytes()))
}

/// Compute the hex HMAC-SHA384 of an encoded payload
pub fn sign_payload(secret: &str, encoded_payload: &str) -> AuthResult<String> {
    let mut mac = HmacSha384::new_from_slice(secret.as_bytes())
        .map_err(|e| AuthError::InvalidCredentials(e.to_string()))?;
    mac.update(encoded_payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Authentication material for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// API key
    pub api_key: String,
    /// Hex encoded HMAC-SHA384 of `payload`
    pub signature: String,
    /// Base64 encoded JSON payload
    pub payload: String,
}

impl SignedPayload {
    /// Header name/value pairs to attach to the request
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            (API_KEY_HEADER, self.api_key.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
            (PAYLOAD_HEADER, self.payload.as_str()),
        ]
    }
}

/// Signs request payloads with a set of credentials
#[derive(Debug, Clone, Copy)]
pub struct PayloadSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> PayloadSigner<'a> {
    /// Create a signer over borrowed credentials
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Encode and sign a payload
    pub fn sign<T: Serialize + ?Sized>(&self, payload: &T) -> AuthResult<SignedPayload> {
        let encoded = encode_payload(payload)?;
        let signature = sign_payload(self.credentials.secret(), &encoded)?;

        Ok(SignedPayload {
            api_key: self.credentials.api_key().to_string(),
            signature,
            payload: encoded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ENCODED: &str = "eyJub25jZSI6IjEiLCJyZXF1ZXN0IjoiL3YxL2JhbGFuY2VzIn0=";
    const EXPECTED_SIGNATURE: &str = "9aadab245908a21cbb1a1412c2940edb23af33419edef87a7f11a3009f12d1f512c85b401443efe3c4263cfc5c5a0fda";

    fn creds(secret: &str) -> Credentials {
        Credentials::new("API_KEY", secret).unwrap()
    }

    #[test]
    fn test_encode_payload() {
        let encoded = encode_payload(&json!({"nonce": "1", "request": "/v1/balances"})).unwrap();
        assert_eq!(encoded, ENCODED);
    }

    #[test]
    fn test_known_signature() {
        assert_eq!(sign_payload("secret", ENCODED).unwrap(), EXPECTED_SIGNATURE);
    }

    #[test]
    fn test_signature_is_lowercase_hex_of_sha384() {
        let signature = sign_payload("secret", "payload").unwrap();
        assert_eq!(signature.len(), 96);
        assert!(signature.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_signing_consistency() {
        let creds = creds("secret");
        let payload = json!({"request": "/v1/balances", "nonce": "1616492376594"});

        let first = PayloadSigner::new(&creds).sign(&payload).unwrap();
        let second = PayloadSigner::new(&creds).sign(&payload).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_signature_changes_with_payload() {
        let creds = creds("secret");
        let signer = PayloadSigner::new(&creds);

        let a = signer.sign(&json!({"request": "/v1/balances", "nonce": "1"})).unwrap();
        let b = signer.sign(&json!({"request": "/v1/balances", "nonce": "2"})).unwrap();
        assert_ne!(a.signature, b.signature);
        assert_ne!(a.payload, b.payload);
    }

    #[test]
    fn test_signature_changes_with_secret() {
        let payload = json!({"request": "/v1/balances", "nonce": "1"});
        let a = PayloadSigner::new(&creds("secret-a")).sign(&payload).unwrap();
        let b = PayloadSigner::new(&creds("secret-b")).sign(&payload).unwrap();
        assert_eq!(a.payload, b.payload);
        assert_ne!(a.signature, b.signature);
    }

    #[test]
    fn test_headers_carry_key_signature_payload() {
        let creds = creds("secret");
        let signed = PayloadSigner::new(&creds)
            .sign(&json!({"nonce": "1", "request": "/v1/balances"}))
            .unwrap();

        let headers = signed.headers();
        assert_eq!(headers[0], (API_KEY_HEADER, "API_KEY"));
        assert_eq!(headers[1], (SIGNATURE_HEADER, EXPECTED_SIGNATURE));
        assert_eq!(headers[2], (PAYLOAD_HEADER, ENCODED));
        assert!(headers.iter().all(|(_, value)| !value.contains("secret")));
    }
}
