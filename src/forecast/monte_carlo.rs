//! Monte Carlo price-path simulation.
//!
//! Each path owns its own seeded generator (daily base seed plus
//! path-index stride), so paths are independent and the whole simulation
//! is reproducible regardless of execution order. Paths are embarrassingly
//! parallel and run under rayon.

use rayon::prelude::*;
use serde::Serialize;

use crate::core::calendar;
use crate::core::error::ForgeError;
use crate::core::rng::SeededRng;
use crate::core::types::{closes, round_to, Candle};
use crate::core::Result;

/// Default number of simulated paths.
pub const DEFAULT_SIMULATIONS: usize = 500;

/// Seed stride between adjacent paths (prime, to decorrelate streams).
const PATH_SEED_STRIDE: u32 = 7919;

/// Per-day distribution summary across all simulated paths.
#[derive(Debug, Clone, Serialize)]
pub struct PercentileRow {
    /// Days ahead; day 0 is the last known price.
    pub day: usize,
    pub p5: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p95: f64,
    pub mean: f64,
}

/// Summary statistics over the simulated terminal distribution.
#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloStats {
    /// Final-day mean vs last known price, percent.
    pub expected_return: f64,
    /// Final-day p95 vs last known price, percent.
    pub max_upside: f64,
    /// Final-day p5 vs last known price, percent.
    pub max_downside: f64,
    /// Annualized volatility of historical log-returns, percent.
    pub volatility: f64,
    /// Share of paths ending above the starting price, percent.
    pub bullish_probability: f64,
    /// Annualized mean return over annualized volatility; 0 when
    /// volatility is 0.
    pub sharpe_ratio: f64,
    /// Number of paths run.
    pub simulations: usize,
}

/// Monte Carlo forecast: per-day percentile rows plus statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloForecast {
    pub predictions: Vec<PercentileRow>,
    pub statistics: MonteCarloStats,
}

/// Run the simulation against the wall clock (paths reseed daily).
pub fn monte_carlo(data: &[Candle], days: usize, simulations: usize) -> Result<MonteCarloForecast> {
    monte_carlo_at(data, days, simulations, calendar::now_ms())
}

/// Run the simulation against an explicit clock, for deterministic tests.
pub fn monte_carlo_at(
    data: &[Candle],
    days: usize,
    simulations: usize,
    now_ms: i64,
) -> Result<MonteCarloForecast> {
    if simulations == 0 {
        return Err(ForgeError::invalid_parameter(
            "simulations must be at least 1",
        ));
    }
    let prices = closes(data);
    if prices.len() < 2 {
        return Err(ForgeError::insufficient_data(2, prices.len()));
    }

    // Historical log-returns drive the drift and diffusion.
    let returns: Vec<f64> = prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let mean_return = returns.iter().sum::<f64>() / returns.len() as f64;
    let std_return = (returns
        .iter()
        .map(|r| (r - mean_return).powi(2))
        .sum::<f64>()
        / returns.len() as f64)
        .sqrt();

    let last_price = prices[prices.len() - 1];
    let seed_base = calendar::day_number(now_ms) as u32;

    let all_paths: Vec<Vec<f64>> = (0..simulations)
        .into_par_iter()
        .map(|s| {
            let mut rng = SeededRng::new(seed_base.wrapping_add(s as u32 * PATH_SEED_STRIDE));
            let mut path = Vec::with_capacity(days + 1);
            let mut price = last_price;
            path.push(price);

            for _ in 0..days {
                let u1 = rng.next();
                let u2 = rng.next();
                // Box-Muller; u1 clamped away from zero so ln stays finite.
                let z = (-2.0 * u1.max(1e-4).ln()).sqrt()
                    * (2.0 * std::f64::consts::PI * u2).cos();
                price *= (mean_return + std_return * z).exp();
                path.push(round_to(price, 4));
            }
            path
        })
        .collect();

    let mut predictions = Vec::with_capacity(days + 1);
    for d in 0..=days {
        let mut day_prices: Vec<f64> = all_paths.iter().map(|p| p[d]).collect();
        day_prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        // Percentile is the sorted value at floor(simulations * p),
        // not interpolated.
        let pick = |p: f64| day_prices[((simulations as f64 * p).floor() as usize).min(simulations - 1)];
        let mean = day_prices.iter().sum::<f64>() / simulations as f64;

        predictions.push(PercentileRow {
            day: d,
            p5: pick(0.05),
            p25: pick(0.25),
            median: pick(0.5),
            p75: pick(0.75),
            p95: pick(0.95),
            mean: round_to(mean, 4),
        });
    }

    let final_row = &predictions[days];
    let bullish = all_paths.iter().filter(|p| p[days] > last_price).count();

    let statistics = MonteCarloStats {
        expected_return: round_to((final_row.mean / last_price - 1.0) * 100.0, 2),
        max_upside: round_to((final_row.p95 / last_price - 1.0) * 100.0, 2),
        max_downside: round_to((final_row.p5 / last_price - 1.0) * 100.0, 2),
        volatility: round_to(std_return * 252f64.sqrt() * 100.0, 2),
        bullish_probability: round_to(bullish as f64 / simulations as f64 * 100.0, 1),
        sharpe_ratio: if std_return == 0.0 {
            0.0
        } else {
            round_to(mean_return * 252.0 / (std_return * 252f64.sqrt()), 3)
        },
        simulations,
    };

    Ok(MonteCarloForecast {
        predictions,
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW_MS: i64 = 1_704_412_800_000;

    fn series(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.31).sin() * 4.0 + i as f64 * 0.05;
                Candle {
                    date: format!("d{}", i),
                    timestamp: i as i64 * 86_400_000,
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1000,
                }
            })
            .collect()
    }

    #[test]
    fn test_deterministic_for_fixed_clock() {
        let data = series(120);
        let a = monte_carlo_at(&data, 10, 50, NOW_MS).unwrap();
        let b = monte_carlo_at(&data, 10, 50, NOW_MS).unwrap();
        for (x, y) in a.predictions.iter().zip(b.predictions.iter()) {
            assert_eq!(x.median, y.median);
            assert_eq!(x.mean, y.mean);
        }
        assert_eq!(
            a.statistics.bullish_probability,
            b.statistics.bullish_probability
        );
    }

    #[test]
    fn test_day_zero_is_last_price() {
        let data = series(80);
        let result = monte_carlo_at(&data, 15, 40, NOW_MS).unwrap();
        let last = data.last().unwrap().close;
        let row = &result.predictions[0];
        assert_eq!(row.p5, last);
        assert_eq!(row.p95, last);
        assert_eq!(row.median, last);
    }

    #[test]
    fn test_percentiles_ordered() {
        let data = series(120);
        let result = monte_carlo_at(&data, 30, 200, NOW_MS).unwrap();
        for row in &result.predictions {
            assert!(row.p5 <= row.p25);
            assert!(row.p25 <= row.median);
            assert!(row.median <= row.p75);
            assert!(row.p75 <= row.p95);
        }
    }

    #[test]
    fn test_single_simulation_degenerates() {
        let data = series(60);
        let result = monte_carlo_at(&data, 5, 1, NOW_MS).unwrap();
        for row in &result.predictions {
            assert_eq!(row.p5, row.median);
            assert_eq!(row.median, row.p95);
            assert_eq!(row.p25, row.p75);
        }
        assert_eq!(result.statistics.simulations, 1);
    }

    #[test]
    fn test_bullish_probability_bounds() {
        let data = series(120);
        let result = monte_carlo_at(&data, 30, 100, NOW_MS).unwrap();
        let p = result.statistics.bullish_probability;
        assert!((0.0..=100.0).contains(&p));
    }

    #[test]
    fn test_insufficient_history() {
        let data = series(1);
        assert!(monte_carlo_at(&data, 10, 10, NOW_MS).is_err());
    }

    #[test]
    fn test_zero_volatility_sharpe_is_zero() {
        let flat: Vec<Candle> = (0..30)
            .map(|i| Candle {
                date: format!("d{}", i),
                timestamp: i as i64 * 86_400_000,
                open: 100.0,
                high: 100.0,
                low: 100.0,
                close: 100.0,
                volume: 1000,
            })
            .collect();
        let result = monte_carlo_at(&flat, 5, 10, NOW_MS).unwrap();
        assert_eq!(result.statistics.sharpe_ratio, 0.0);
        assert_eq!(result.statistics.volatility, 0.0);
    }
}
