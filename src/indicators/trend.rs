//! Trend indicators: SMA, EMA.

use crate::core::error::ForgeError;
use crate::core::types::round_to;
use crate::core::Result;

/// Simple Moving Average, O(n) via a rolling sum.
///
/// # Arguments
/// * `closes` - Close prices
/// * `period` - Lookback period
///
/// # Returns
/// Vector aligned with the input; NaN for the warmup period
/// (index < period - 1). Values rounded to 4 decimals.
pub fn sma(closes: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(ForgeError::invalid_parameter("SMA period must be > 0"));
    }

    let n = closes.len();
    let mut result = vec![f64::NAN; n];
    let mut window_sum = 0.0;

    for i in 0..n {
        window_sum += closes[i];
        if i >= period {
            window_sum -= closes[i - period];
        }
        if i >= period - 1 {
            result[i] = round_to(window_sum / period as f64, 4);
        }
    }

    Ok(result)
}

/// Exponential Moving Average.
///
/// Seeded with the simple mean of the first `period` closes at index
/// period - 1, then `ema = (close - ema) * multiplier + ema` with
/// multiplier 2 / (period + 1).
///
/// # Returns
/// Vector aligned with the input; NaN before index period - 1.
/// Values rounded to 4 decimals.
pub fn ema(closes: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(ForgeError::invalid_parameter("EMA period must be > 0"));
    }

    let n = closes.len();
    let mut result = vec![f64::NAN; n];

    if period > n {
        return Ok(result);
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut value = closes[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = round_to(value, 4);

    for i in period..n {
        value = (closes[i] - value) * multiplier + value;
        result[i] = round_to(value, 4);
    }

    Ok(result)
}
