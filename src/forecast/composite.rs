//! Composite score blending the four forecast models.

use serde::Serialize;
use tracing::warn;

use crate::core::calendar;
use crate::core::types::{round_to, Candle};
use crate::core::Result;

use super::mean_reversion::mean_reversion;
use super::momentum::momentum;
use super::monte_carlo::monte_carlo_at;
use super::regression::{linear_regression, TrendDirection};

/// Forecast horizon the composite evaluates each model over.
const COMPOSITE_HORIZON_DAYS: usize = 30;

/// Path count for the embedded Monte Carlo run. Smaller than the
/// standalone default; the composite only needs the bullish share.
const COMPOSITE_SIMULATIONS: usize = 200;

/// A model that fails on the given history contributes this neutral score.
const NEUTRAL_SCORE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "STRONG SELL")]
    StrongSell,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::StrongBuy => write!(f, "STRONG BUY"),
            Recommendation::Buy => write!(f, "BUY"),
            Recommendation::Hold => write!(f, "HOLD"),
            Recommendation::Sell => write!(f, "SELL"),
            Recommendation::StrongSell => write!(f, "STRONG SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::Low => write!(f, "Low"),
        }
    }
}

/// Per-model scores on a 0-100 scale; 50 when a model failed.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub monte_carlo: f64,
    pub regression: f64,
    pub mean_reversion: f64,
    pub momentum: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompositeScore {
    /// Weighted blend, 0-100, 1 decimal.
    pub score: f64,
    pub recommendation: Recommendation,
    pub confidence: Confidence,
    pub breakdown: ScoreBreakdown,
}

/// Composite score against the wall clock.
pub fn composite_score(data: &[Candle]) -> Result<CompositeScore> {
    composite_score_at(data, calendar::now_ms())
}

/// Composite score with an explicit clock for the Monte Carlo leg.
///
/// Each model contributes a score in [0, 1] at a fixed weight: Monte
/// Carlo bullish probability (0.30), regression trend scaled by r²
/// (0.25), mean-reversion deviation buckets (0.20), and the momentum
/// score remapped from [-1, 1] (0.25). A model that errors degrades to
/// a neutral 0.5 instead of failing the whole composite.
pub fn composite_score_at(data: &[Candle], now_ms: i64) -> Result<CompositeScore> {
    let mut breakdown = ScoreBreakdown {
        monte_carlo: 50.0,
        regression: 50.0,
        mean_reversion: 50.0,
        momentum: 50.0,
    };

    let mc_score = match monte_carlo_at(data, COMPOSITE_HORIZON_DAYS, COMPOSITE_SIMULATIONS, now_ms)
    {
        Ok(mc) => {
            let score = mc.statistics.bullish_probability / 100.0;
            breakdown.monte_carlo = round_to(score * 100.0, 1);
            score
        }
        Err(err) => {
            warn!(model = "monte_carlo", %err, "model degraded to neutral");
            NEUTRAL_SCORE
        }
    };

    let lr_score = match linear_regression(data, COMPOSITE_HORIZON_DAYS) {
        Ok(lr) => {
            let score = match lr.trend_direction {
                TrendDirection::Bullish => 0.5 + lr.r_squared * 0.5,
                TrendDirection::Bearish => 0.5 - lr.r_squared * 0.5,
            };
            breakdown.regression = round_to(score * 100.0, 1);
            score
        }
        Err(err) => {
            warn!(model = "regression", %err, "model degraded to neutral");
            NEUTRAL_SCORE
        }
    };

    let mr_score = match mean_reversion(data, COMPOSITE_HORIZON_DAYS) {
        Ok(mr) => {
            let score = if mr.current_deviation > 10.0 {
                0.3
            } else if mr.current_deviation < -10.0 {
                0.7
            } else {
                0.5
            };
            breakdown.mean_reversion = round_to(score * 100.0, 1);
            score
        }
        Err(err) => {
            warn!(model = "mean_reversion", %err, "model degraded to neutral");
            NEUTRAL_SCORE
        }
    };

    let mom_score = match momentum(data, COMPOSITE_HORIZON_DAYS) {
        Ok(m) => {
            let score = (m.momentum_score + 1.0) / 2.0;
            breakdown.momentum = round_to(score * 100.0, 1);
            score
        }
        Err(err) => {
            warn!(model = "momentum", %err, "model degraded to neutral");
            NEUTRAL_SCORE
        }
    };

    let composite = mc_score * 0.30 + lr_score * 0.25 + mr_score * 0.20 + mom_score * 0.25;

    let (recommendation, confidence) = if composite > 0.7 {
        (Recommendation::StrongBuy, Confidence::High)
    } else if composite > 0.55 {
        (Recommendation::Buy, Confidence::Medium)
    } else if composite > 0.45 {
        (Recommendation::Hold, Confidence::Low)
    } else if composite > 0.3 {
        (Recommendation::Sell, Confidence::Medium)
    } else {
        (Recommendation::StrongSell, Confidence::High)
    };

    Ok(CompositeScore {
        score: round_to(composite * 100.0, 1),
        recommendation,
        confidence,
        breakdown,
    })
}
