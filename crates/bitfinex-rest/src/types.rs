//! Typed records for Bitfinex v2 responses
//!
//! v2 endpoints answer with positional JSON arrays. Ticker arrays come in
//! two shapes depending on the instrument:
//!
//! - trading pairs (`t` prefix), 11 slots with the symbol
//! - funding currencies (`f` prefix), 14 slots with the symbol, plus
//!   trailing slots on newer API versions
//!
//! The symbol prefix selects the shape; the arity must then agree with it.

use crate::error::{RestError, RestResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Instrument category encoded in a v2 symbol prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    /// `t` prefix, e.g. `tBTCUSD`
    TradingPair,
    /// `f` prefix, e.g. `fUSD`
    FundingCurrency,
}

impl SymbolKind {
    /// Classify a v2 symbol by its prefix
    pub fn of(symbol: &str) -> Option<Self> {
        match symbol.as_bytes().first() {
            Some(b't') if symbol.len() > 1 => Some(Self::TradingPair),
            Some(b'f') if symbol.len() > 1 => Some(Self::FundingCurrency),
            _ => None,
        }
    }

    /// Number of data slots after the symbol
    fn data_len(self) -> usize {
        match self {
            Self::TradingPair => TRADING_PAIR_FIELDS,
            Self::FundingCurrency => FUNDING_CURRENCY_FIELDS,
        }
    }
}

const TRADING_PAIR_FIELDS: usize = 10;
const FUNDING_CURRENCY_FIELDS: usize = 13;
/// Slot (after the symbol) of FRR_AMOUNT_AVAILABLE on newer funding tickers
const FRR_AMOUNT_AVAILABLE_SLOT: usize = 15;

/// Ticker for a trading pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingPairData {
    /// Symbol, e.g. `tBTCUSD`
    pub symbol: String,
    /// Price of last highest bid
    pub bid: Decimal,
    /// Sum of the 25 highest bid sizes
    pub bid_size: Decimal,
    /// Price of last lowest ask
    pub ask: Decimal,
    /// Sum of the 25 lowest ask sizes
    pub ask_size: Decimal,
    /// Amount that the last price has changed since yesterday
    pub daily_change: Decimal,
    /// Relative price change since yesterday (*100 for percentage)
    pub daily_change_perc: Decimal,
    pub last_price: Decimal,
    pub volume: Decimal,
    pub high: Decimal,
    pub low: Decimal,
}

impl TradingPairData {
    fn from_slots(symbol: String, slots: &[Value]) -> RestResult<Self> {
        let f = Slots::new(&symbol, slots);
        Ok(Self {
            bid: f.decimal(0, "bid")?,
            bid_size: f.decimal(1, "bid_size")?,
            ask: f.decimal(2, "ask")?,
            ask_size: f.decimal(3, "ask_size")?,
            daily_change: f.decimal(4, "daily_change")?,
            daily_change_perc: f.decimal(5, "daily_change_perc")?,
            last_price: f.decimal(6, "last_price")?,
            volume: f.decimal(7, "volume")?,
            high: f.decimal(8, "high")?,
            low: f.decimal(9, "low")?,
            symbol,
        })
    }

    /// Mid price (average of bid and ask)
    pub fn mid_price(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }

    /// Spread in basis points of the mid price
    pub fn spread_bps(&self) -> Option<Decimal> {
        let mid = self.mid_price();
        if mid.is_zero() {
            return None;
        }
        Some((self.ask - self.bid) / mid * Decimal::from(10000))
    }
}

/// Ticker for a funding currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingCurrencyData {
    /// Symbol, e.g. `fUSD`
    pub symbol: String,
    /// Flash Return Rate: average of all fixed rate funding over the last hour
    pub frr: Decimal,
    pub bid: Decimal,
    /// Bid period covered in days
    pub bid_period: u32,
    pub bid_size: Decimal,
    pub ask: Decimal,
    /// Ask period covered in days
    pub ask_period: u32,
    pub ask_size: Decimal,
    pub daily_change: Decimal,
    pub daily_change_perc: Decimal,
    pub last_price: Decimal,
    pub volume: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    /// Funding available at FRR, only sent by newer API versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frr_amount_available: Option<Decimal>,
}

impl FundingCurrencyData {
    fn from_slots(symbol: String, slots: &[Value]) -> RestResult<Self> {
        let f = Slots::new(&symbol, slots);
        let frr_amount_available = match slots.get(FRR_AMOUNT_AVAILABLE_SLOT) {
            Some(value) if value.is_number() => {
                Some(f.decimal(FRR_AMOUNT_AVAILABLE_SLOT, "frr_amount_available")?)
            }
            _ => None,
        };

        Ok(Self {
            frr: f.decimal(0, "frr")?,
            bid: f.decimal(1, "bid")?,
            bid_period: f.period(2, "bid_period")?,
            bid_size: f.decimal(3, "bid_size")?,
            ask: f.decimal(4, "ask")?,
            ask_period: f.period(5, "ask_period")?,
            ask_size: f.decimal(6, "ask_size")?,
            daily_change: f.decimal(7, "daily_change")?,
            daily_change_perc: f.decimal(8, "daily_change_perc")?,
            last_price: f.decimal(9, "last_price")?,
            volume: f.decimal(10, "volume")?,
            high: f.decimal(11, "high")?,
            low: f.decimal(12, "low")?,
            frr_amount_available,
            symbol,
        })
    }
}

/// One element of a v2 ticker response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TickerRecord {
    TradingPair(TradingPairData),
    FundingCurrency(FundingCurrencyData),
}

impl TickerRecord {
    /// The record's symbol
    pub fn symbol(&self) -> &str {
        match self {
            Self::TradingPair(data) => &data.symbol,
            Self::FundingCurrency(data) => &data.symbol,
        }
    }

    /// The record's instrument category
    pub fn kind(&self) -> SymbolKind {
        match self {
            Self::TradingPair(_) => SymbolKind::TradingPair,
            Self::FundingCurrency(_) => SymbolKind::FundingCurrency,
        }
    }

    /// Last traded price
    pub fn last_price(&self) -> Decimal {
        match self {
            Self::TradingPair(data) => data.last_price,
            Self::FundingCurrency(data) => data.last_price,
        }
    }

    pub fn as_trading_pair(&self) -> Option<&TradingPairData> {
        match self {
            Self::TradingPair(data) => Some(data),
            Self::FundingCurrency(_) => None,
        }
    }

    pub fn as_funding_currency(&self) -> Option<&FundingCurrencyData> {
        match self {
            Self::FundingCurrency(data) => Some(data),
            Self::TradingPair(_) => None,
        }
    }

    /// Build a record from a `/v2/tickers` element (symbol in slot 0)
    pub fn from_tickers_element(element: &Value) -> RestResult<Self> {
        let slots = element.as_array().ok_or_else(|| {
            RestError::UnexpectedShape(format!("ticker element is not an array: {}", element))
        })?;

        let symbol = slots
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| {
                RestError::UnexpectedShape(format!("ticker element has no symbol: {}", element))
            })?
            .to_string();

        Self::from_slots(symbol, &slots[1..])
    }

    /// Build a record from a `/v2/ticker/:symbol` body (no symbol slot)
    pub fn from_single_ticker(symbol: &str, body: &Value) -> RestResult<Self> {
        let slots = body.as_array().ok_or_else(|| {
            RestError::UnexpectedShape(format!("ticker for {} is not an array: {}", symbol, body))
        })?;

        Self::from_slots(symbol.to_string(), slots)
    }

    fn from_slots(symbol: String, slots: &[Value]) -> RestResult<Self> {
        let kind = SymbolKind::of(&symbol).ok_or_else(|| {
            RestError::UnexpectedShape(format!("unrecognised symbol prefix: {:?}", symbol))
        })?;

        let arity_ok = match kind {
            SymbolKind::TradingPair => slots.len() == kind.data_len(),
            SymbolKind::FundingCurrency => slots.len() >= kind.data_len(),
        };
        if !arity_ok {
            return Err(RestError::UnexpectedShape(format!(
                "{} ticker has {} fields, expected {} for {:?}",
                symbol,
                slots.len() + 1,
                kind.data_len() + 1,
                kind
            )));
        }

        match kind {
            SymbolKind::TradingPair => TradingPairData::from_slots(symbol, slots).map(Self::TradingPair),
            SymbolKind::FundingCurrency => {
                FundingCurrencyData::from_slots(symbol, slots).map(Self::FundingCurrency)
            }
        }
    }
}

/// Map a `/v2/tickers` response onto the requested symbols
///
/// The result has one record per requested symbol, in request order. A
/// response that does not line up with the request is rejected rather than
/// partially mapped.
pub fn parse_tickers<S: AsRef<str>>(body: &Value, symbols: &[S]) -> RestResult<Vec<TickerRecord>> {
    let elements = body.as_array().ok_or_else(|| {
        RestError::UnexpectedShape(format!("tickers response is not an array: {}", body))
    })?;

    if elements.len() != symbols.len() {
        return Err(RestError::UnexpectedShape(format!(
            "requested {} tickers, received {}",
            symbols.len(),
            elements.len()
        )));
    }

    elements
        .iter()
        .zip(symbols)
        .map(|(element, requested)| {
            let record = TickerRecord::from_tickers_element(element)?;
            if record.symbol() != requested.as_ref() {
                return Err(RestError::UnexpectedShape(format!(
                    "expected ticker for {}, received {}",
                    requested.as_ref(),
                    record.symbol()
                )));
            }
            Ok(record)
        })
        .collect()
}

/// Map a `/v2/platform/status` response (`[1]` or `[0]`)
pub fn parse_platform_status(body: &Value) -> RestResult<bool> {
    match body.as_array().map(Vec::as_slice) {
        Some([flag]) => match flag.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(RestError::UnexpectedShape(format!("platform status flag: {}", flag))),
        },
        _ => Err(RestError::UnexpectedShape(format!("platform status: {}", body))),
    }
}

/// Typed accessors over the data slots of one ticker array
struct Slots<'a> {
    symbol: &'a str,
    values: &'a [Value],
}

impl<'a> Slots<'a> {
    fn new(symbol: &'a str, values: &'a [Value]) -> Self {
        Self { symbol, values }
    }

    fn value(&self, index: usize, name: &str) -> RestResult<&'a Value> {
        self.values.get(index).ok_or_else(|| {
            RestError::UnexpectedShape(format!("{}: missing {}", self.symbol, name))
        })
    }

    fn decimal(&self, index: usize, name: &str) -> RestResult<Decimal> {
        let value = self.value(index, name)?;
        if !value.is_number() {
            return Err(self.bad_value(name, value));
        }
        serde_json::from_value(value.clone()).map_err(|_| self.bad_value(name, value))
    }

    fn period(&self, index: usize, name: &str) -> RestResult<u32> {
        let value = self.value(index, name)?;
        value
            .as_u64()
            .and_then(|days| u32::try_from(days).ok())
            .ok_or_else(|| self.bad_value(name, value))
    }

    fn bad_value(&self, name: &str, value: &Value) -> RestError {
        RestError::UnexpectedShape(format!("{}: invalid {}: {}", self.symbol, name, value))
    }
}
