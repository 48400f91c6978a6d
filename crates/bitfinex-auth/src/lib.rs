//! Authentication primitives for the Bitfinex REST API
//!
//! This crate holds API credentials, issues strictly increasing nonces and
//! signs request payloads with HMAC-SHA384 as required by Bitfinex's
//! authenticated endpoints.
//!
//! # Example
//!
//! ```no_run
//! use bitfinex_auth::{Credentials, NonceGenerator, PayloadSigner};
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from BITFINEX_KEY / BITFINEX_SECRET
//!     let creds = Credentials::from_env()?;
//!     let nonces = NonceGenerator::default();
//!
//!     let payload = json!({"request": "/v1/balances", "nonce": nonces.next()?});
//!     let signed = PayloadSigner::new(&creds).sign(&payload)?;
//!
//!     for (name, value) in signed.headers() {
//!         println!("{}: {}", name, value);
//!     }
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod nonce;
mod signer;

pub use credentials::{Credentials, KEY_ENV_VAR, SECRET_ENV_VAR};
pub use error::{AuthError, AuthResult};
pub use nonce::{NonceGenerator, DEFAULT_NONCE_MULTIPLIER};
pub use signer::{
    encode_payload, sign_payload, PayloadSigner, SignedPayload, API_KEY_HEADER, PAYLOAD_HEADER,
    SIGNATURE_HEADER,
};
