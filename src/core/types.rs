//! Core data types for marketforge.

use serde::{Deserialize, Serialize};

/// Type alias for price values.
pub type Price = f64;

/// Asset class of an instrument. Crypto and Forex trade 24/7;
/// the other categories skip weekends during data generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    Stocks,
    Crypto,
    Commodities,
    Forex,
    Indices,
}

impl AssetCategory {
    /// Whether this category trades every calendar day.
    #[inline]
    pub fn is_continuous(self) -> bool {
        matches!(self, AssetCategory::Crypto | AssetCategory::Forex)
    }
}

/// Static configuration for one instrument. Immutable for process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Unique ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Asset class.
    pub category: AssetCategory,
    /// Anchor price the synthetic walk reverts toward.
    pub base_price: Price,
    /// Daily volatility as a fraction (std-dev of daily returns).
    pub volatility: f64,
    /// Daily drift fraction; may be negative.
    pub trend: f64,
    /// Market beta.
    pub beta: f64,
    /// Annual dividend yield as a fraction.
    pub dividend_yield: f64,
    /// Sector label, where applicable.
    pub sector: Option<String>,
}

/// One day's OHLCV candle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    /// Calendar day in ISO form (YYYY-MM-DD).
    pub date: String,
    /// Epoch milliseconds at the start of the day.
    pub timestamp: i64,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    /// Traded volume, rounded to a whole number.
    pub volume: u64,
}

/// Extract close prices from a candle series.
pub fn closes(data: &[Candle]) -> Vec<f64> {
    data.iter().map(|c| c.close).collect()
}

/// Extract high prices from a candle series.
pub fn highs(data: &[Candle]) -> Vec<f64> {
    data.iter().map(|c| c.high).collect()
}

/// Extract low prices from a candle series.
pub fn lows(data: &[Candle]) -> Vec<f64> {
    data.iter().map(|c| c.low).collect()
}

/// Round to a fixed number of decimal places. Applied once, after all
/// arithmetic, never to intermediate values.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
