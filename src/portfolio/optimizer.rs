//! Risk-tolerance weighted portfolio construction.

use serde::Serialize;
use tracing::debug;

use crate::core::calendar;
use crate::core::error::ForgeError;
use crate::core::types::{closes, round_to};
use crate::core::Result;
use crate::market::MarketData;

use super::correlation::correlation_matrix;

/// Trading days of history each asset is evaluated over.
const LOOKBACK_DAYS: usize = 252;

/// Floor on the raw (pre-normalization) weight so every resolved asset
/// keeps a nonzero allocation.
const MIN_RAW_WEIGHT: f64 = 0.02;

/// Per-asset allocation with its annualized statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Allocation {
    pub symbol: String,
    pub name: String,
    /// Annualized mean log-return, percent.
    pub annual_return: f64,
    /// Annualized volatility, percent.
    pub annual_volatility: f64,
    /// Return over volatility; 0 when volatility is 0.
    pub sharpe: f64,
    pub current_price: f64,
    /// Normalized weight, percent, 1 decimal.
    pub weight: f64,
}

/// Whole-portfolio statistics under the chosen weights.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioMetrics {
    pub expected_return: f64,
    /// Weighted volatility treating assets as uncorrelated.
    pub volatility: f64,
    pub sharpe_ratio: f64,
    /// 100 * (1 - largest weight / 100), as a 0-100 score.
    pub diversification_score: f64,
}

/// Correlation matrix labeled by the symbols that resolved.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub symbols: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioResult {
    pub allocations: Vec<Allocation>,
    pub portfolio: PortfolioMetrics,
    pub correlation_matrix: CorrelationMatrix,
    pub risk_tolerance: f64,
}

/// Optimize against the wall clock.
pub fn optimize(market: &MarketData, symbols: &[&str], risk_tolerance: f64) -> Result<PortfolioResult> {
    optimize_at(market, symbols, risk_tolerance, calendar::now_ms())
}

/// Build a weighted portfolio from the requested symbols.
///
/// Unknown symbols are skipped, not fatal; the whole call fails with
/// `NoValidAssets` only when none resolve. Each asset's raw weight is
/// `max(0.02, annualReturn - annualVolatility * (1 - riskTolerance) + 5)`
/// (return and volatility in percent), then normalized to sum to 100.
/// Higher risk tolerance shrinks the volatility penalty.
pub fn optimize_at(
    market: &MarketData,
    symbols: &[&str],
    risk_tolerance: f64,
    now_ms: i64,
) -> Result<PortfolioResult> {
    if !(0.0..=1.0).contains(&risk_tolerance) {
        return Err(ForgeError::invalid_parameter(
            "risk tolerance must be within [0, 1]",
        ));
    }

    struct AssetStats {
        symbol: String,
        name: String,
        annual_return: f64,
        annual_volatility: f64,
        sharpe: f64,
        current_price: f64,
    }

    let mut stats = Vec::new();
    let mut return_series = Vec::new();
    let mut resolved = Vec::new();

    for &sym in symbols {
        let asset = match market.catalog().get(sym) {
            Some(a) => a,
            None => {
                debug!(symbol = sym, "skipping unknown symbol");
                continue;
            }
        };
        let data = market.get_historical_at(asset, LOOKBACK_DAYS, now_ms);
        let prices = closes(&data);
        let daily: Vec<f64> = prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect();

        let mean = daily.iter().sum::<f64>() / daily.len() as f64;
        let std = (daily.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / daily.len() as f64)
            .sqrt();

        stats.push(AssetStats {
            symbol: sym.to_string(),
            name: asset.name.clone(),
            annual_return: round_to(mean * 252.0 * 100.0, 2),
            annual_volatility: round_to(std * 252f64.sqrt() * 100.0, 2),
            sharpe: if std == 0.0 {
                0.0
            } else {
                round_to(mean * 252.0 / (std * 252f64.sqrt()), 3)
            },
            current_price: prices[prices.len() - 1],
        });
        return_series.push(daily);
        resolved.push(sym.to_string());
    }

    if stats.is_empty() {
        return Err(ForgeError::NoValidAssets);
    }

    let matrix = correlation_matrix(&return_series);

    let raw_weights: Vec<f64> = stats
        .iter()
        .map(|a| {
            let penalty = a.annual_volatility * (1.0 - risk_tolerance);
            (a.annual_return - penalty + 5.0).max(MIN_RAW_WEIGHT)
        })
        .collect();
    let total: f64 = raw_weights.iter().sum();
    let weights: Vec<f64> = raw_weights
        .iter()
        .map(|w| round_to(w / total * 100.0, 1))
        .collect();

    let port_return: f64 = stats
        .iter()
        .zip(weights.iter())
        .map(|(a, w)| a.annual_return * w / 100.0)
        .sum();
    // Cross-asset correlations are reported but not folded into the
    // portfolio volatility; assets are treated as uncorrelated here.
    let port_vol: f64 = stats
        .iter()
        .zip(weights.iter())
        .map(|(a, w)| (a.annual_volatility * w / 100.0).powi(2))
        .sum::<f64>()
        .sqrt();

    let max_weight = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let allocations = stats
        .into_iter()
        .zip(weights.iter())
        .map(|(a, &weight)| Allocation {
            symbol: a.symbol,
            name: a.name,
            annual_return: a.annual_return,
            annual_volatility: a.annual_volatility,
            sharpe: a.sharpe,
            current_price: a.current_price,
            weight,
        })
        .collect();

    Ok(PortfolioResult {
        allocations,
        portfolio: PortfolioMetrics {
            expected_return: round_to(port_return, 2),
            volatility: round_to(port_vol, 2),
            sharpe_ratio: if port_vol == 0.0 {
                0.0
            } else {
                round_to(port_return / port_vol, 3)
            },
            diversification_score: round_to(1.0 - max_weight / 100.0, 2) * 100.0,
        },
        correlation_matrix: CorrelationMatrix {
            symbols: resolved,
            matrix,
        },
        risk_tolerance,
    })
}
