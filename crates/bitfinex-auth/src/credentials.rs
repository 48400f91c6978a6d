//! API credentials for Bitfinex private endpoints
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::{AuthError, AuthResult};

/// Environment variable holding the API key
pub const KEY_ENV_VAR: &str = "BITFINEX_KEY";

/// Environment variable holding the API secret
pub const SECRET_ENV_VAR: &str = "BITFINEX_SECRET";

/// API credentials for authenticated requests
///
/// The secret is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (public, sent as a header)
    api_key: String,
    /// API secret (HMAC key, never sent)
    secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// Both halves must be non-empty.
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let secret = secret.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            secret: SecretString::from(secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BITFINEX_KEY` and `BITFINEX_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(KEY_ENV_VAR)
            .map_err(|_| AuthError::EnvVarNotSet(KEY_ENV_VAR.to_string()))?;
        let secret = std::env::var(SECRET_ENV_VAR)
            .map_err(|_| AuthError::EnvVarNotSet(SECRET_ENV_VAR.to_string()))?;

        Self::new(api_key, secret)
    }

    /// Resolve credentials from explicit values, falling back to the environment
    ///
    /// Each explicit value takes precedence over its environment variable.
    /// Returns `None` when either the key or the secret is still missing,
    /// which leaves the client restricted to public endpoints.
    pub fn resolve(api_key: Option<String>, secret: Option<String>) -> Option<Self> {
        Self::resolve_with(api_key, secret, |name| std::env::var(name).ok())
    }

    /// Same as [`Credentials::resolve`] with a caller-supplied variable lookup
    pub fn resolve_with<F>(api_key: Option<String>, secret: Option<String>, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: Option<String>, var: &str| {
            if let Some(value) = explicit.filter(|value| !value.is_empty()) {
                debug!(field = var, source = "explicit", "Resolved credential");
                return Some(value);
            }
            let value = lookup(var).filter(|value| !value.is_empty());
            match value {
                Some(_) => debug!(field = var, source = "environment", "Resolved credential"),
                None => debug!(field = var, "Credential not provided"),
            }
            value
        };

        let api_key = pick(api_key, KEY_ENV_VAR)?;
        let secret = pick(secret, SECRET_ENV_VAR)?;

        Self::new(api_key, secret).ok()
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret: SecretString::from(self.secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", prefix))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
