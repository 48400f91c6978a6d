//! Error types for REST API operations

use bitfinex_auth::AuthError;
use std::fmt;
use std::time::Duration;

/// Body of a failed HTTP response
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// Body parsed as JSON
    Json(serde_json::Value),
    /// Body that was not valid JSON, kept verbatim
    Text(String),
}

impl ErrorBody {
    /// Parse a raw body, keeping the text if it is not JSON
    pub fn from_raw(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(raw),
        }
    }

    /// The parsed JSON body, if any
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{}", value),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Server answered with a non-success status
    #[error("API error {status} {reason}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Reason phrase for the status code
        reason: String,
        /// Parsed or raw response body
        body: ErrorBody,
    },

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {duration:?}")]
    Timeout {
        /// Configured timeout
        duration: Duration,
    },

    /// Connection-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Caller supplied an invalid combination of arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Private endpoint called without credentials
    #[error("Missing credentials: set BITFINEX_KEY and BITFINEX_SECRET or pass them explicitly")]
    MissingCredentials,

    /// Response did not have the documented shape
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// Failed to parse a success response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Signing or credential error
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid base URL or path
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl RestError {
    /// Map a reqwest failure, keeping timeouts distinct
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout { duration: timeout }
        } else {
            Self::Http(err)
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the server rejected the request (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// Check if the server failed to handle the request (5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// Check if repeating the call could succeed
    ///
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Http(_) => true,
            Self::Api { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
