//! Momentum forecast blending RSI, MACD, and Stochastic readings.

use serde::Serialize;

use crate::core::error::ForgeError;
use crate::core::types::{closes, round_to, Candle};
use crate::core::Result;
use crate::indicators::{macd, rsi, stochastic};

use super::regression::TrendDirection;

/// Overbought / oversold reading of an oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OscillatorBias {
    Overbought,
    Oversold,
    Neutral,
}

impl std::fmt::Display for OscillatorBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OscillatorBias::Overbought => write!(f, "Overbought"),
            OscillatorBias::Oversold => write!(f, "Oversold"),
            OscillatorBias::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Trading signal derived from the blended momentum score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MomentumSignal {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    Buy,
    Hold,
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl std::fmt::Display for MomentumSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MomentumSignal::StrongBuy => write!(f, "Strong Buy"),
            MomentumSignal::Buy => write!(f, "Buy"),
            MomentumSignal::Hold => write!(f, "Hold"),
            MomentumSignal::Sell => write!(f, "Sell"),
            MomentumSignal::StrongSell => write!(f, "Strong Sell"),
        }
    }
}

/// Latest indicator readings that fed the score.
#[derive(Debug, Clone, Serialize)]
pub struct MomentumIndicators {
    pub rsi: f64,
    pub rsi_signal: OscillatorBias,
    pub macd_histogram: f64,
    pub macd_signal: TrendDirection,
    pub stochastic_k: f64,
    pub stochastic_signal: OscillatorBias,
}

#[derive(Debug, Clone, Serialize)]
pub struct MomentumPoint {
    pub day: usize,
    pub predicted: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MomentumForecast {
    pub predictions: Vec<MomentumPoint>,
    /// Blended score in [-1, 1].
    pub momentum_score: f64,
    pub signal: MomentumSignal,
    pub indicators: MomentumIndicators,
}

/// Last defined (non-NaN) value of a series.
fn last_defined(values: &[f64]) -> Option<f64> {
    values.iter().rev().copied().find(|v| !v.is_nan())
}

/// Momentum forecast over `days` ahead.
///
/// Per-indicator scores in [-1, 1]: RSI and Stochastic score -1 when
/// overbought, +1 when oversold, and `(50 - value) / 50` in between;
/// the MACD histogram contributes its sign. Scores blend at weights
/// 0.35 / 0.35 / 0.30. The projected change decays with `exp(-d / 30)`
/// and is scaled by recent volatility; the first step applies on day 0.
/// Indicators still inside their warmup fall back to neutral readings
/// (RSI 50, histogram 0, %K 50).
pub fn momentum(data: &[Candle], days: usize) -> Result<MomentumForecast> {
    let prices = closes(data);
    if prices.is_empty() {
        return Err(ForgeError::empty_data("momentum"));
    }

    let rsi_series = rsi(&prices, 14)?;
    let macd_result = macd(&prices)?;
    let stoch = stochastic(data, 14)?;

    let last_rsi = last_defined(&rsi_series).unwrap_or(50.0);
    let last_hist = last_defined(&macd_result.histogram).unwrap_or(0.0);
    let last_k = last_defined(&stoch.k).unwrap_or(50.0);

    let rsi_score = if last_rsi > 70.0 {
        -1.0
    } else if last_rsi < 30.0 {
        1.0
    } else {
        (50.0 - last_rsi) / 50.0
    };
    let macd_score = if last_hist > 0.0 { 1.0 } else { -1.0 };
    let stoch_score = if last_k > 80.0 {
        -1.0
    } else if last_k < 20.0 {
        1.0
    } else {
        (50.0 - last_k) / 50.0
    };

    let score = rsi_score * 0.35 + macd_score * 0.35 + stoch_score * 0.3;
    let current = prices[prices.len() - 1];

    // Root-mean-square of the last 20 log-returns; a stock constant when
    // the history is too short.
    let volatility = if data.len() > 20 {
        let tail = &prices[prices.len() - 20..];
        let sum_sq: f64 = tail
            .windows(2)
            .map(|w| (w[1] / w[0]).ln().powi(2))
            .sum();
        (sum_sq / 19.0).sqrt()
    } else {
        0.02
    };

    let mut predictions = Vec::with_capacity(days + 1);
    let mut price = current;
    for d in 0..=days {
        let decay = (-(d as f64) / 30.0).exp();
        price *= 1.0 + score * volatility * decay * 0.5;
        predictions.push(MomentumPoint {
            day: d,
            predicted: round_to(price, 4),
        });
    }

    let signal = if score > 0.3 {
        MomentumSignal::StrongBuy
    } else if score > 0.1 {
        MomentumSignal::Buy
    } else if score > -0.1 {
        MomentumSignal::Hold
    } else if score > -0.3 {
        MomentumSignal::Sell
    } else {
        MomentumSignal::StrongSell
    };

    let rsi_bias = if last_rsi > 70.0 {
        OscillatorBias::Overbought
    } else if last_rsi < 30.0 {
        OscillatorBias::Oversold
    } else {
        OscillatorBias::Neutral
    };
    let stoch_bias = if last_k > 80.0 {
        OscillatorBias::Overbought
    } else if last_k < 20.0 {
        OscillatorBias::Oversold
    } else {
        OscillatorBias::Neutral
    };

    Ok(MomentumForecast {
        predictions,
        momentum_score: round_to(score, 3),
        signal,
        indicators: MomentumIndicators {
            rsi: round_to(last_rsi, 2),
            rsi_signal: rsi_bias,
            macd_histogram: round_to(last_hist, 4),
            macd_signal: if last_hist > 0.0 {
                TrendDirection::Bullish
            } else {
                TrendDirection::Bearish
            },
            stochastic_k: round_to(last_k, 2),
            stochastic_signal: stoch_bias,
        },
    })
}
