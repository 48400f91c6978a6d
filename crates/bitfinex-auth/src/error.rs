//! Error types for authentication operations

/// Errors that can occur while loading credentials or signing payloads
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Payload could not be serialized to JSON
    #[error("Payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Nonce multiplier must be finite and strictly positive
    #[error("Invalid nonce multiplier: {0}")]
    InvalidNonceMultiplier(f64),

    /// System clock reports a time before the Unix epoch
    #[error("System clock error: time went backwards")]
    SystemClock,
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
