//! Momentum indicators: RSI, MACD, Stochastic.

use serde::Serialize;

use crate::core::error::ForgeError;
use crate::core::types::{round_to, Candle};
use crate::core::Result;

use super::trend::ema;

/// Relative Strength Index with Wilder's smoothing.
///
/// The first `period` gains/losses seed the running averages; subsequent
/// values use `avg = (avg * (period - 1) + current) / period`. RSI is 100
/// when the average loss is zero. NaN for the first `period` indices; a
/// series shorter than period + 1 closes is all NaN.
///
/// # Returns
/// Vector aligned with the input, values in [0, 100] rounded to 2 decimals.
pub fn rsi(closes: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(ForgeError::invalid_parameter("RSI period must be > 0"));
    }

    let n = closes.len();
    let mut result = vec![f64::NAN; n];

    if n < period + 1 {
        return Ok(result);
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss += -change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    result[period] = rsi_value(avg_gain, avg_loss);

    for i in (period + 1)..n {
        let change = closes[i] - closes[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;

        result[i] = rsi_value(avg_gain, avg_loss);
    }

    Ok(result)
}

#[inline]
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        round_to(100.0 - 100.0 / (1.0 + rs), 2)
    }
}

/// MACD result: line, signal, histogram, all aligned with the input.
#[derive(Debug, Clone, Serialize)]
pub struct MacdResult {
    /// EMA(12) - EMA(26); NaN until both EMAs are defined.
    pub macd_line: Vec<f64>,
    /// EMA(9) of the MACD line, seeded by the simple mean of the first
    /// 9 valid MACD values.
    pub signal: Vec<f64>,
    /// MACD line - signal.
    pub histogram: Vec<f64>,
}

/// Moving Average Convergence Divergence with the standard 12/26/9 setup.
pub fn macd(closes: &[f64]) -> Result<MacdResult> {
    const SIGNAL_PERIOD: usize = 9;

    let n = closes.len();
    let ema12 = ema(closes, 12)?;
    let ema26 = ema(closes, 26)?;

    let mut macd_line = vec![f64::NAN; n];
    let mut valid_macd = Vec::new();
    for i in 0..n {
        if !ema12[i].is_nan() && !ema26[i].is_nan() {
            let val = ema12[i] - ema26[i];
            macd_line[i] = round_to(val, 4);
            valid_macd.push(val);
        }
    }

    let mut signal = vec![f64::NAN; n];
    let mut histogram = vec![f64::NAN; n];
    let mut value: Option<f64> = None;
    let mut valid_count = 0usize;

    let multiplier = 2.0 / (SIGNAL_PERIOD as f64 + 1.0);
    for i in 0..n {
        if macd_line[i].is_nan() {
            continue;
        }
        valid_count += 1;
        if valid_count < SIGNAL_PERIOD {
            continue;
        }
        let next = match value {
            // Seed from the first SIGNAL_PERIOD valid MACD values, not the
            // raw close series.
            None => valid_macd[..SIGNAL_PERIOD].iter().sum::<f64>() / SIGNAL_PERIOD as f64,
            Some(prev) => (macd_line[i] - prev) * multiplier + prev,
        };
        value = Some(next);
        signal[i] = round_to(next, 4);
        histogram[i] = round_to(macd_line[i] - next, 4);
    }

    Ok(MacdResult {
        macd_line,
        signal,
        histogram,
    })
}

/// Stochastic oscillator result, aligned with the input.
#[derive(Debug, Clone, Serialize)]
pub struct StochasticResult {
    /// %K, 0-100.
    pub k: Vec<f64>,
    /// %D: simple mean of the last 3 %K values.
    pub d: Vec<f64>,
}

/// Stochastic Oscillator.
///
/// %K = (close - lowestLow) / (highestHigh - lowestLow) * 100 over the
/// trailing `period` candles, defaulting to 50 when the range is zero.
/// %D needs 3 %K values. Rounded to 2 decimals.
pub fn stochastic(data: &[Candle], period: usize) -> Result<StochasticResult> {
    if period == 0 {
        return Err(ForgeError::invalid_parameter(
            "Stochastic period must be > 0",
        ));
    }

    let n = data.len();
    let mut k = vec![f64::NAN; n];
    let mut d = vec![f64::NAN; n];
    let mut k_values = Vec::new();

    for i in 0..n {
        if i + 1 < period {
            continue;
        }
        let window = &data[i + 1 - period..=i];
        let highest = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let lowest = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);

        let k_val = if highest == lowest {
            50.0
        } else {
            (data[i].close - lowest) / (highest - lowest) * 100.0
        };
        k[i] = round_to(k_val, 2);
        k_values.push(k_val);

        if k_values.len() >= 3 {
            let d_val = k_values[k_values.len() - 3..].iter().sum::<f64>() / 3.0;
            d[i] = round_to(d_val, 2);
        }
    }

    Ok(StochasticResult { k, d })
}
