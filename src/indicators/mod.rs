//! Technical indicators for marketforge.
//!
//! All indicators are pure functions over close-price slices or candle
//! slices, returning Vec outputs aligned index-for-index with the input.
//! NaN marks the warmup window where a value is not yet computable; it
//! serializes to JSON null. Rounding is applied once, after all
//! arithmetic.

pub mod levels;
pub mod momentum;
pub mod trend;
pub mod volatility;

pub use levels::{fibonacci, FibonacciLevels};
pub use momentum::{macd, rsi, stochastic, MacdResult, StochasticResult};
pub use trend::{ema, sma};
pub use volatility::{atr, bollinger_bands, BollingerBands};
