//! REST API client for the Bitfinex cryptocurrency exchange
//!
//! This crate provides a thin client over Bitfinex's v1 and v2 REST APIs.
//!
//! # Features
//!
//! - **v1 public**: today, ticker, stats, symbols, symbol details
//! - **v2 public**: platform status, typed tickers for trading pairs and
//!   funding currencies
//! - **v1 private**: account info, balances, summary, key info, trades
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Payloads are signed with
//! HMAC-SHA384 as specified by Bitfinex's API documentation; see the
//! `bitfinex-auth` crate.
//!
//! # Example
//!
//! ```no_run
//! use bitfinex_rest::{BitfinexClient, TickerRecord};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BitfinexClient::new()?;
//!     let today = client.today("btcusd").await?;
//!     println!("BTC/USD today: {}", today);
//!
//!     for record in client.tickers(&["tBTCUSD", "fUSD"]).await? {
//!         match record {
//!             TickerRecord::TradingPair(t) => println!("{} last {}", t.symbol, t.last_price),
//!             TickerRecord::FundingCurrency(f) => println!("{} frr {}", f.symbol, f.frr),
//!         }
//!     }
//!
//!     // Private endpoints (auth required)
//!     let auth_client = BitfinexClient::with_keys("key", "secret")?;
//!     let balances = auth_client.balances().await?;
//!     println!("Balances: {}", balances);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Retries
//!
//! The client never retries. [`RestError::is_retryable`] tells callers
//! which failures are worth repeating.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{BitfinexClient, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ErrorBody, RestError, RestResult};
pub use transport::{Request, Transport};

// Re-export typed responses
pub use types::{
    parse_platform_status, parse_tickers, FundingCurrencyData, SymbolKind, TickerRecord,
    TradingPairData,
};

// Re-export auth types
pub use bitfinex_auth::{AuthError, Credentials};
