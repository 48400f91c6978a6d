//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, PublicV1Endpoints, PublicV2Endpoints};
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::TickerRecord;
use bitfinex_auth::{Credentials, NonceGenerator, DEFAULT_NONCE_MULTIPLIER};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Public API host
pub const DEFAULT_BASE_URL: &str = "https://api.bitfinex.com";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 5;

const DEFAULT_USER_AGENT: &str = concat!("bitfinex-rest/", env!("CARGO_PKG_VERSION"));

/// Bitfinex REST API client (v1 and v2)
///
/// Provides access to both public and private endpoints.
///
/// # Example
///
/// ```no_run
/// use bitfinex_rest::BitfinexClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Credentials are picked up from BITFINEX_KEY / BITFINEX_SECRET if set
///     let client = BitfinexClient::new()?;
///
///     if client.platform_status().await? {
///         let tickers = client.tickers(&["tBTCUSD", "fUSD"]).await?;
///         println!("{:?}", tickers);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BitfinexClient {
    transport: Transport,
    credentials: Option<Credentials>,
    /// Shared across clones so one key never sees a repeated nonce
    nonces: Arc<NonceGenerator>,
}

impl BitfinexClient {
    /// Create a client with default configuration
    ///
    /// Credentials come from the environment when present; otherwise only
    /// public endpoints are available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with explicit key and secret
    pub fn with_keys(api_key: impl Into<String>, secret: impl Into<String>) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_key(api_key).with_secret(secret))
    }

    /// Create a client with ready-made credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let nonces = NonceGenerator::new(config.nonce_multiplier)?;
        let transport = Transport::new(
            &config.base_url,
            config.timeout,
            config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        )?;

        let credentials = match config.credentials {
            Some(credentials) => Some(credentials),
            None if config.use_env => Credentials::resolve(config.api_key, config.api_secret),
            None => Credentials::resolve_with(config.api_key, config.api_secret, |_| None),
        };

        info!(
            base_url = %transport.base_url(),
            authenticated = credentials.is_some(),
            "Created Bitfinex REST client"
        );

        Ok(Self {
            transport,
            credentials,
            nonces: Arc::new(nonces),
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// The configured nonce multiplier
    pub fn nonce_multiplier(&self) -> f64 {
        self.nonces.multiplier()
    }

    /// The configured per-request timeout
    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    /// Absolute URL for an API path
    pub fn url_for(&self, path: &str) -> RestResult<String> {
        Ok(self.transport.url_for(path)?.to_string())
    }

    // ========================================================================
    // Public v1 Endpoints
    // ========================================================================

    /// Get public v1 endpoints
    pub fn v1(&self) -> PublicV1Endpoints<'_> {
        PublicV1Endpoints::new(&self.transport)
    }

    /// `GET /v1/today/:symbol`
    pub async fn today(&self, symbol: &str) -> RestResult<Value> {
        self.v1().today(symbol).await
    }

    /// `GET /v1/pubticker/:symbol`
    pub async fn ticker(&self, symbol: &str) -> RestResult<Value> {
        self.v1().ticker(symbol).await
    }

    /// `GET /v1/stats/:symbol`
    pub async fn stats(&self, symbol: &str) -> RestResult<Value> {
        self.v1().stats(symbol).await
    }

    /// `GET /v1/symbols`
    pub async fn symbols(&self) -> RestResult<Value> {
        self.v1().symbols().await
    }

    /// `GET /v1/symbol_details`
    pub async fn symbol_details(&self) -> RestResult<Value> {
        self.v1().symbol_details().await
    }

    // ========================================================================
    // Public v2 Endpoints
    // ========================================================================

    /// Get public v2 endpoints
    pub fn v2(&self) -> PublicV2Endpoints<'_> {
        PublicV2Endpoints::new(&self.transport)
    }

    /// True if the platform is operative, false during maintenance
    pub async fn platform_status(&self) -> RestResult<bool> {
        self.v2().platform_status().await
    }

    /// Typed tickers for several symbols, in request order
    pub async fn tickers(&self, symbols: &[&str]) -> RestResult<Vec<TickerRecord>> {
        self.v2().tickers(symbols).await
    }

    /// Typed ticker for one v2 symbol
    pub async fn ticker_v2(&self, symbol: &str) -> RestResult<TickerRecord> {
        self.v2().ticker(symbol).await
    }

    // ========================================================================
    // Private v1 Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::MissingCredentials)?;
        Ok(AccountEndpoints::new(&self.transport, creds, &self.nonces))
    }

    /// `POST /v1/account_infos`
    pub async fn account_infos(&self) -> RestResult<Value> {
        self.account()?.account_infos().await
    }

    /// `POST /v1/balances`
    pub async fn balances(&self) -> RestResult<Value> {
        self.account()?.balances().await
    }

    /// `POST /v1/summary`
    pub async fn summary(&self) -> RestResult<Value> {
        self.account()?.summary().await
    }

    /// `POST /v1/key_info`
    pub async fn key_info(&self) -> RestResult<Value> {
        self.account()?.key_info().await
    }

    /// `POST /v1/mytrades`
    pub async fn my_trades(&self, symbol: &str, limit: Option<u32>) -> RestResult<Value> {
        self.account()?.my_trades(symbol, limit).await
    }
}

impl std::fmt::Debug for BitfinexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitfinexClient")
            .field("base_url", &self.transport.base_url().as_str())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Ready-made credentials; take precedence over key/secret
    pub credentials: Option<Credentials>,
    /// Explicit API key
    pub api_key: Option<String>,
    /// Explicit API secret
    pub api_secret: Option<String>,
    /// Fall back to `BITFINEX_KEY` / `BITFINEX_SECRET`
    pub use_env: bool,
    /// Scales the time-based nonce
    pub nonce_multiplier: f64,
    /// Request timeout
    pub timeout: Duration,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// API host
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            api_key: None,
            api_secret: None,
            use_env: true,
            nonce_multiplier: DEFAULT_NONCE_MULTIPLIER,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_key = self
            .api_key
            .as_ref()
            .map(|key| format!("{}...", key.chars().take(8).collect::<String>()));
        f.debug_struct("ClientConfig")
            .field("credentials", &self.credentials)
            .field("api_key", &api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field("use_env", &self.use_env)
            .field("nonce_multiplier", &self.nonce_multiplier)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the API key
    pub fn with_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    /// Never read credentials from the environment
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Set nonce multiplier
    pub fn with_nonce_multiplier(mut self, multiplier: f64) -> Self {
        self.nonce_multiplier = multiplier;
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitfinex_auth::AuthError;

    #[test]
    fn test_client_without_credentials() {
        let client = BitfinexClient::with_config(ClientConfig::new().without_env()).unwrap();
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_client_with_keys() {
        let client = BitfinexClient::with_keys("key", "secret").unwrap();
        assert!(client.has_credentials());
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(60))
            .with_nonce_multiplier(2.0)
            .with_user_agent("test-agent")
            .with_base_url("http://localhost:8080");

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.nonce_multiplier, 2.0);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.use_env);
    }

    #[test]
    fn test_defaults() {
        let client = BitfinexClient::with_config(ClientConfig::new().without_env()).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
        assert_eq!(client.nonce_multiplier(), 1.0);
        assert_eq!(
            client.url_for("/v2/platform/status").unwrap(),
            "https://api.bitfinex.com/v2/platform/status"
        );
    }

    #[test]
    fn test_half_credentials_without_env() {
        let config = ClientConfig::new().with_key("key").without_env();
        let client = BitfinexClient::with_config(config).unwrap();
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_missing_credentials_error() {
        let client = BitfinexClient::with_config(ClientConfig::new().without_env()).unwrap();
        let result = client.account();
        assert!(matches!(result, Err(RestError::MissingCredentials)));
    }

    #[test]
    fn test_invalid_nonce_multiplier() {
        let result = BitfinexClient::with_config(ClientConfig::new().with_nonce_multiplier(0.0));
        assert!(matches!(
            result,
            Err(RestError::Auth(AuthError::InvalidNonceMultiplier(_)))
        ));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = BitfinexClient::with_keys("key", "top-secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("has_credentials: true"));
    }

    #[test]
    fn test_config_debug_hides_secret() {
        let config = ClientConfig::new()
            .with_key("my_api_key_123")
            .with_secret("top-secret")
            .with_credentials(Credentials::new("other_key", "other-secret").unwrap());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("top-secret"));
        assert!(!debug.contains("other-secret"));
        assert!(!debug.contains("my_api_key_123"));
        assert!(debug.contains("my_api_k..."));
        assert!(debug.contains("[REDACTED]"));

        let debug = format!("{:?}", ClientConfig::new());
        assert!(debug.contains("api_secret: None"));
    }
}
