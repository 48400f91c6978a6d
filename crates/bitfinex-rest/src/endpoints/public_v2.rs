//! Public v2 endpoints

use crate::error::{RestError, RestResult};
use crate::transport::{Request, Transport};
use crate::types::{parse_platform_status, parse_tickers, TickerRecord};
use tracing::{debug, instrument};

/// Public v2 endpoints
pub struct PublicV2Endpoints<'a> {
    transport: &'a Transport,
}

impl<'a> PublicV2Endpoints<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Get the current status of the platform
    ///
    /// Maintenance periods last a few minutes during upgrades of core
    /// components. `GET /v2/platform/status` answers `[1]` when operative and
    /// `[0]` during maintenance.
    #[instrument(skip(self))]
    pub async fn platform_status(&self) -> RestResult<bool> {
        debug!("Fetching platform status");
        let body = self.transport.execute(Request::get("/v2/platform/status")).await?;
        parse_platform_status(&body)
    }

    /// Get tickers for several symbols in one round trip
    ///
    /// # Arguments
    /// * `symbols` - v2 symbols (e.g., `["tBTCUSD", "fUSD"]`)
    ///
    /// Records come back in the order requested.
    #[instrument(skip(self))]
    pub async fn tickers(&self, symbols: &[&str]) -> RestResult<Vec<TickerRecord>> {
        if symbols.is_empty() {
            return Err(RestError::InvalidArguments(
                "at least one symbol is required".to_string(),
            ));
        }

        debug!("Fetching tickers for {} symbols", symbols.len());

        let request = Request::get("/v2/tickers").query(vec![("symbols", symbols.join(","))]);
        let body = self.transport.execute(request).await?;
        parse_tickers(&body, symbols)
    }

    /// Get the ticker for one symbol
    ///
    /// `GET /v2/ticker/:symbol`
    #[instrument(skip(self))]
    pub async fn ticker(&self, symbol: &str) -> RestResult<TickerRecord> {
        debug!("Fetching ticker for {}", symbol);

        let body = self.transport.execute(Request::get("/v2/ticker").segment(symbol)).await?;
        TickerRecord::from_single_ticker(symbol, &body)
    }
}
