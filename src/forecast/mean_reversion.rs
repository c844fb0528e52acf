//! Mean reversion forecast: exponential convergence toward the long mean.

use serde::Serialize;

use crate::core::error::ForgeError;
use crate::core::types::{closes, round_to, Candle};
use crate::core::Result;

/// Half-life of the deviation from the long mean, in days.
const HALF_LIFE_DAYS: f64 = 20.0;

/// Deviation threshold (fraction of the mean) separating a signal from
/// neutral.
const SIGNAL_THRESHOLD: f64 = 0.1;

/// Positioning relative to the long-run mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReversionSignal {
    #[serde(rename = "Overbought - Sell Signal")]
    Overbought,
    #[serde(rename = "Oversold - Buy Signal")]
    Oversold,
    Neutral,
}

impl std::fmt::Display for ReversionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReversionSignal::Overbought => write!(f, "Overbought - Sell Signal"),
            ReversionSignal::Oversold => write!(f, "Oversold - Buy Signal"),
            ReversionSignal::Neutral => write!(f, "Neutral"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReversionPoint {
    pub day: usize,
    pub predicted: f64,
    /// The long mean the path converges toward.
    pub mean_level: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeanReversionForecast {
    pub predictions: Vec<ReversionPoint>,
    /// Current price vs long mean, percent.
    pub current_deviation: f64,
    pub mean_level: f64,
    pub sma50: f64,
    pub signal: ReversionSignal,
    pub deviation_percent: f64,
}

/// Project price pulling back toward the trailing 200-close mean.
///
/// The long mean is taken over the last 200 closes (or all available).
/// Each step moves the price by `(mean - price) * ln(2) / 20` plus a
/// small upward drift of `mean * 0.0001`; the first step is applied on
/// day 0, so even day 0 is already one step off the last close.
pub fn mean_reversion(data: &[Candle], days: usize) -> Result<MeanReversionForecast> {
    let prices = closes(data);
    if prices.is_empty() {
        return Err(ForgeError::empty_data("mean reversion"));
    }

    let tail = |len: usize| {
        let window = &prices[prices.len().saturating_sub(len)..];
        window.iter().sum::<f64>() / window.len() as f64
    };
    let sma200 = tail(200);
    let sma50 = tail(50);
    let current = prices[prices.len() - 1];

    let deviation = (current - sma200) / sma200;
    let speed = 2f64.ln() / HALF_LIFE_DAYS;

    let mut predictions = Vec::with_capacity(days + 1);
    let mut price = current;
    for d in 0..=days {
        price += (sma200 - price) * speed + sma200 * 0.0001;
        predictions.push(ReversionPoint {
            day: d,
            predicted: round_to(price, 4),
            mean_level: round_to(sma200, 4),
        });
    }

    let signal = if deviation.abs() > SIGNAL_THRESHOLD {
        if deviation > 0.0 {
            ReversionSignal::Overbought
        } else {
            ReversionSignal::Oversold
        }
    } else {
        ReversionSignal::Neutral
    };

    Ok(MeanReversionForecast {
        predictions,
        current_deviation: round_to(deviation * 100.0, 2),
        mean_level: round_to(sma200, 4),
        sma50: round_to(sma50, 4),
        signal,
        deviation_percent: round_to(deviation * 100.0, 2),
    })
}
