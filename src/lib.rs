//! MarketForge - Deterministic market analytics engine.
//!
//! This crate provides a synthetic-data quantitative stack with:
//! - Seeded synthetic OHLCV generation over a fixed instrument catalog
//! - Technical indicators (SMA, EMA, RSI, MACD, Bollinger, ATR, etc.)
//! - Forecast models (Monte Carlo, regression, mean reversion, momentum)
//! - A weighted composite score with recommendation bands
//! - Portfolio optimization with correlation analysis
//! - A full-catalog market scanner
//!
//! Everything is deterministic for a given calendar day: the same symbol
//! and day count reproduce the same candles, forecasts, and scores until
//! the next UTC day rolls over.

pub mod core;
pub mod forecast;
pub mod indicators;
pub mod market;
pub mod portfolio;
pub mod scanner;

pub use self::core::{ForgeError, Result};
pub use forecast::{composite_score, CompositeScore, Confidence, Recommendation};
pub use market::MarketData;
pub use portfolio::{optimize, PortfolioResult};
pub use scanner::{scan, ScannerCache, ScannerItem};
