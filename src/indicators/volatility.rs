//! Volatility indicators: Bollinger Bands, ATR.

use serde::Serialize;

use crate::core::error::ForgeError;
use crate::core::types::{round_to, Candle};
use crate::core::Result;

use super::trend::sma;

/// Bollinger Bands result, aligned with the input.
#[derive(Debug, Clone, Serialize)]
pub struct BollingerBands {
    /// Middle band: SMA(period).
    pub middle: Vec<f64>,
    /// Middle + multiplier * std.
    pub upper: Vec<f64>,
    /// Middle - multiplier * std.
    pub lower: Vec<f64>,
}

/// Bollinger Bands over close prices.
///
/// The standard deviation is the population std-dev of the trailing
/// window around the SMA value. Rounded to 4 decimals.
pub fn bollinger_bands(closes: &[f64], period: usize, std_dev: f64) -> Result<BollingerBands> {
    if std_dev < 0.0 {
        return Err(ForgeError::invalid_parameter(
            "Bollinger Bands multiplier must be >= 0",
        ));
    }

    let n = closes.len();
    let middle = sma(closes, period)?;
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];

    for i in 0..n {
        let mean = middle[i];
        if mean.is_nan() {
            continue;
        }
        let window = &closes[i.saturating_sub(period - 1)..=i];
        let variance =
            window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / window.len() as f64;
        let std = variance.sqrt();
        upper[i] = round_to(mean + std_dev * std, 4);
        lower[i] = round_to(mean - std_dev * std, 4);
    }

    Ok(BollingerBands {
        middle,
        upper,
        lower,
    })
}

/// Average True Range: the simple trailing mean of the last `period` true
/// ranges, where TR = max(high - low, |high - prevClose|, |low - prevClose|).
///
/// Index 0 is always NaN (no prior close on day 0). Rounded to 4 decimals.
pub fn atr(data: &[Candle], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(ForgeError::invalid_parameter("ATR period must be > 0"));
    }

    let n = data.len();
    let mut result = vec![f64::NAN; n];
    let mut trs = Vec::with_capacity(n.saturating_sub(1));

    for i in 1..n {
        let hl = data[i].high - data[i].low;
        let hc = (data[i].high - data[i - 1].close).abs();
        let lc = (data[i].low - data[i - 1].close).abs();
        trs.push(hl.max(hc).max(lc));

        if i < period {
            continue;
        }
        let mean = trs[trs.len() - period..].iter().sum::<f64>() / period as f64;
        result[i] = round_to(mean, 4);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(rows: &[(f64, f64, f64)]) -> Vec<Candle> {
        rows.iter()
            .enumerate()
            .map(|(i, &(high, low, close))| Candle {
                date: format!("2024-02-{:02}", i + 1),
                timestamp: i as i64 * 86_400_000,
                open: close,
                high,
                low,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn test_bollinger_band_ordering() {
        let data: Vec<f64> = (1..=40)
            .map(|x| 50.0 + (x as f64 * 0.4).sin() * 3.0)
            .collect();
        let result = bollinger_bands(&data, 20, 2.0).unwrap();

        assert!(result.middle[18].is_nan());
        assert!(!result.middle[19].is_nan());

        for i in 19..data.len() {
            assert!(result.upper[i] >= result.middle[i]);
            assert!(result.middle[i] >= result.lower[i]);
        }
    }

    #[test]
    fn test_bollinger_zero_multiplier_collapses() {
        let data: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        let result = bollinger_bands(&data, 20, 0.0).unwrap();
        for i in 19..data.len() {
            assert!((result.upper[i] - result.middle[i]).abs() < 1e-9);
            assert!((result.lower[i] - result.middle[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_atr_warmup_and_positive() {
        let data = candles(&[
            (50.0, 48.0, 49.0),
            (51.0, 49.0, 50.0),
            (52.0, 50.0, 51.0),
            (51.5, 49.5, 50.0),
            (50.5, 48.5, 49.0),
            (51.0, 49.0, 50.0),
        ]);
        let result = atr(&data, 3).unwrap();

        assert!(result[0].is_nan());
        assert!(result[2].is_nan());
        assert!(!result[3].is_nan());
        assert!(result[3] > 0.0);
    }

    #[test]
    fn test_atr_gap_uses_prev_close() {
        // Gap up: TR = |high - prevClose| dominates high - low.
        let data = candles(&[(10.0, 9.0, 9.5), (15.0, 14.0, 14.5)]);
        let result = atr(&data, 1).unwrap();
        assert!((result[1] - 5.5).abs() < 1e-10);
    }
}
