//! Core types and utilities for marketforge.

pub mod calendar;
pub mod error;
pub mod rng;
pub mod types;

pub use calendar::{day_number, is_trading_day, DAY_MS, DEFAULT_MARKET_DAYS};
pub use error::{ForgeError, Result};
pub use rng::SeededRng;
pub use types::*;
