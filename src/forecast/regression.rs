//! Linear regression forecast with a 95% confidence band.

use serde::Serialize;

use crate::core::error::ForgeError;
use crate::core::types::{closes, round_to, Candle};
use crate::core::Result;

/// Sign of the fitted slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    Bullish,
    Bearish,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Bullish => write!(f, "Bullish"),
            TrendDirection::Bearish => write!(f, "Bearish"),
        }
    }
}

/// One projected point with its confidence band.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionPoint {
    pub day: usize,
    pub predicted: f64,
    /// predicted + 1.96 * standard error.
    pub upper: f64,
    /// predicted - 1.96 * standard error.
    pub lower: f64,
}

/// Ordinary least squares fit over (index, close) plus projections.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionForecast {
    pub predictions: Vec<RegressionPoint>,
    /// Fitted slope, rounded to 6 decimals.
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub trend_direction: TrendDirection,
    /// Slope again, at price precision (4 decimals).
    pub daily_change: f64,
}

/// Fit OLS over the whole series and project `days` ahead.
///
/// Projection for day `d` evaluates the fit at index `n + d`, so day 0
/// already sits one step past the end of the series. Needs at least 3
/// closes (the standard error divides by n - 2).
pub fn linear_regression(data: &[Candle], days: usize) -> Result<RegressionForecast> {
    let y = closes(data);
    let n = y.len();
    if n < 3 {
        return Err(ForgeError::insufficient_data(3, n));
    }
    let nf = n as f64;

    let sum_x: f64 = (0..n).map(|i| i as f64).sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = y.iter().enumerate().map(|(i, yi)| i as f64 * yi).sum();
    let sum_x2: f64 = (0..n).map(|i| (i as f64) * (i as f64)).sum();

    let slope = (nf * sum_xy - sum_x * sum_y) / (nf * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / nf;

    let ss_res: f64 = y
        .iter()
        .enumerate()
        .map(|(i, yi)| {
            let r = yi - (slope * i as f64 + intercept);
            r * r
        })
        .sum();
    let std_error = (ss_res / (nf - 2.0)).sqrt();

    let mean_y = sum_y / nf;
    let ss_tot: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
    // A flat series has no variance to explain; treat the fit as
    // uninformative rather than dividing by zero.
    let r_squared = if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot };

    let mut predictions = Vec::with_capacity(days + 1);
    for d in 0..=days {
        let predicted = slope * (n + d) as f64 + intercept;
        predictions.push(RegressionPoint {
            day: d,
            predicted: round_to(predicted, 4),
            upper: round_to(predicted + 1.96 * std_error, 4),
            lower: round_to(predicted - 1.96 * std_error, 4),
        });
    }

    Ok(RegressionForecast {
        predictions,
        slope: round_to(slope, 6),
        intercept: round_to(intercept, 4),
        r_squared: round_to(r_squared, 4),
        trend_direction: if slope > 0.0 {
            TrendDirection::Bullish
        } else {
            TrendDirection::Bearish
        },
        daily_change: round_to(slope, 4),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                date: format!("d{}", i),
                timestamp: i as i64 * 86_400_000,
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn test_perfect_line_recovered() {
        // close = 2x + 10 exactly.
        let data = candles(&[10.0, 12.0, 14.0, 16.0, 18.0, 20.0]);
        let result = linear_regression(&data, 5).unwrap();

        assert!((result.slope - 2.0).abs() < 1e-9);
        assert!((result.intercept - 10.0).abs() < 1e-9);
        assert!((result.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(result.trend_direction, TrendDirection::Bullish);

        // Day 0 projects at index n = 6: 2*6 + 10 = 22.
        assert!((result.predictions[0].predicted - 22.0).abs() < 1e-9);
        assert!((result.predictions[5].predicted - 32.0).abs() < 1e-9);

        // Zero residuals collapse the band.
        assert!((result.predictions[0].upper - result.predictions[0].lower).abs() < 1e-9);
    }

    #[test]
    fn test_downtrend_is_bearish() {
        let data = candles(&[50.0, 48.0, 47.0, 44.0, 43.0, 40.0]);
        let result = linear_regression(&data, 10).unwrap();
        assert_eq!(result.trend_direction, TrendDirection::Bearish);
        assert!(result.slope < 0.0);
    }

    #[test]
    fn test_band_contains_prediction() {
        let data = candles(&[100.0, 103.0, 99.0, 105.0, 101.0, 107.0, 104.0]);
        let result = linear_regression(&data, 30).unwrap();
        for p in &result.predictions {
            assert!(p.lower <= p.predicted);
            assert!(p.predicted <= p.upper);
        }
    }

    #[test]
    fn test_flat_series_is_uninformative() {
        let data = candles(&[75.0; 10]);
        let result = linear_regression(&data, 5).unwrap();
        assert_eq!(result.r_squared, 0.0);
        assert!((result.slope).abs() < 1e-12);
        assert!((result.predictions[0].predicted - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_points() {
        let data = candles(&[10.0, 11.0]);
        assert!(linear_regression(&data, 5).is_err());
    }
}
