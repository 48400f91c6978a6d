//! Public v1 endpoints
//!
//! These endpoints don't require authentication. Responses are returned as
//! decoded JSON, unchanged.

use crate::error::RestResult;
use crate::transport::{Request, Transport};
use serde_json::Value;
use tracing::{debug, instrument};

/// Public v1 market data endpoints
pub struct PublicV1Endpoints<'a> {
    transport: &'a Transport,
}

impl<'a> PublicV1Endpoints<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Today's low, high and volume
    ///
    /// `GET /v1/today/:symbol`, e.g.
    /// `{"low":"550.09","high":"572.2398","volume":"7305.33119836"}`
    #[instrument(skip(self))]
    pub async fn today(&self, symbol: &str) -> RestResult<Value> {
        debug!("Fetching today's summary for {}", symbol);
        self.transport.execute(Request::get("/v1/today").segment(symbol)).await
    }

    /// Innermost bid/ask and last trade information
    ///
    /// `GET /v1/pubticker/:symbol`
    #[instrument(skip(self))]
    pub async fn ticker(&self, symbol: &str) -> RestResult<Value> {
        debug!("Fetching ticker for {}", symbol);
        self.transport.execute(Request::get("/v1/pubticker").segment(symbol)).await
    }

    /// Volume statistics over several periods
    ///
    /// `GET /v1/stats/:symbol`
    #[instrument(skip(self))]
    pub async fn stats(&self, symbol: &str) -> RestResult<Value> {
        debug!("Fetching stats for {}", symbol);
        self.transport.execute(Request::get("/v1/stats").segment(symbol)).await
    }

    /// List of symbol names
    ///
    /// `GET /v1/symbols`
    #[instrument(skip(self))]
    pub async fn symbols(&self) -> RestResult<Value> {
        debug!("Fetching symbols");
        self.transport.execute(Request::get("/v1/symbols")).await
    }

    /// Precision, order size limits and margin data for every pair
    ///
    /// `GET /v1/symbol_details`
    #[instrument(skip(self))]
    pub async fn symbol_details(&self) -> RestResult<Value> {
        debug!("Fetching symbol details");
        self.transport.execute(Request::get("/v1/symbol_details")).await
    }
}
