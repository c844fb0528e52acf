//! Price levels: Fibonacci retracement.

use serde::Serialize;

use crate::core::error::ForgeError;
use crate::core::types::{round_to, Candle};
use crate::core::Result;

/// Fibonacci retracement levels between the recent high and low.
#[derive(Debug, Clone, Serialize)]
pub struct FibonacciLevels {
    /// Ratio 0.0: the high itself.
    pub level_0: f64,
    pub level_236: f64,
    pub level_382: f64,
    pub level_500: f64,
    pub level_618: f64,
    pub level_786: f64,
    /// Ratio 1.0: the low itself.
    pub level_1000: f64,
}

/// Number of trailing closes the retracement window spans.
const FIB_LOOKBACK: usize = 60;

/// Retracement levels from the last 60 closes (or all available, if
/// fewer). Each level sits at `high - diff * ratio`. Rounded to 4
/// decimals.
pub fn fibonacci(data: &[Candle]) -> Result<FibonacciLevels> {
    if data.is_empty() {
        return Err(ForgeError::empty_data("fibonacci"));
    }

    let start = data.len().saturating_sub(FIB_LOOKBACK);
    let window = &data[start..];
    let high = window.iter().map(|c| c.close).fold(f64::NEG_INFINITY, f64::max);
    let low = window.iter().map(|c| c.close).fold(f64::INFINITY, f64::min);
    let diff = high - low;

    let level = |ratio: f64| round_to(high - diff * ratio, 4);

    Ok(FibonacciLevels {
        level_0: level(0.0),
        level_236: level(0.236),
        level_382: level(0.382),
        level_500: level(0.5),
        level_618: level(0.618),
        level_786: level(0.786),
        level_1000: level(1.0),
    })
}
