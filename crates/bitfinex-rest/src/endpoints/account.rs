//! Private v1 account endpoints
//!
//! These endpoints require authentication. Every request carries a JSON
//! payload with the request path and a fresh nonce; the payload is signed
//! and sent both as headers and as the body.

use crate::error::RestResult;
use crate::transport::{Request, Transport};
use bitfinex_auth::{Credentials, NonceGenerator, PayloadSigner};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// Private v1 account endpoints
pub struct AccountEndpoints<'a> {
    transport: &'a Transport,
    credentials: &'a Credentials,
    nonces: &'a NonceGenerator,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(
        transport: &'a Transport,
        credentials: &'a Credentials,
        nonces: &'a NonceGenerator,
    ) -> Self {
        Self {
            transport,
            credentials,
            nonces,
        }
    }

    /// Make an authenticated POST request
    async fn post(&self, path: &str, params: Map<String, Value>) -> RestResult<Value> {
        let mut payload = Map::new();
        payload.insert("request".to_string(), Value::String(path.to_string()));
        payload.insert("nonce".to_string(), Value::String(self.nonces.next()?));
        payload.extend(params);

        let signed = PayloadSigner::new(self.credentials).sign(&payload)?;

        debug!("Making authenticated request to {}", path);

        let mut request = Request::post(path).json(Value::Object(payload));
        for (name, value) in signed.headers() {
            request = request.header(name, value);
        }

        self.transport.execute(request).await
    }

    /// Account fee and commission information
    #[instrument(skip(self))]
    pub async fn account_infos(&self) -> RestResult<Value> {
        self.post("/v1/account_infos", Map::new()).await
    }

    /// Wallet balances
    #[instrument(skip(self))]
    pub async fn balances(&self) -> RestResult<Value> {
        self.post("/v1/balances", Map::new()).await
    }

    /// 30-day trading volume and fee summary
    #[instrument(skip(self))]
    pub async fn summary(&self) -> RestResult<Value> {
        self.post("/v1/summary", Map::new()).await
    }

    /// Permissions granted to the API key
    #[instrument(skip(self))]
    pub async fn key_info(&self) -> RestResult<Value> {
        self.post("/v1/key_info", Map::new()).await
    }

    /// Past trades for a symbol
    ///
    /// # Arguments
    /// * `symbol` - v1 symbol (e.g., "btcusd")
    /// * `limit` - Maximum number of trades to return (API default 50)
    #[instrument(skip(self))]
    pub async fn my_trades(&self, symbol: &str, limit: Option<u32>) -> RestResult<Value> {
        let mut params = Map::new();
        params.insert("symbol".to_string(), Value::String(symbol.to_string()));
        if let Some(limit) = limit {
            params.insert("limit_trades".to_string(), Value::from(limit));
        }

        self.post("/v1/mytrades", params).await
    }
}
