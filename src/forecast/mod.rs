//! Forecast models over candle history.
//!
//! Four independent models (Monte Carlo, linear regression, mean
//! reversion, momentum) plus a weighted composite over all of them.
//! Each model produces per-day projections for a horizon of `days`
//! ahead, plus model-specific summary fields.

pub mod composite;
pub mod mean_reversion;
pub mod momentum;
pub mod monte_carlo;
pub mod regression;

pub use composite::{
    composite_score, composite_score_at, CompositeScore, Confidence, Recommendation,
    ScoreBreakdown,
};
pub use mean_reversion::{mean_reversion, MeanReversionForecast, ReversionSignal};
pub use momentum::{momentum, MomentumForecast, MomentumSignal, OscillatorBias};
pub use monte_carlo::{
    monte_carlo, monte_carlo_at, MonteCarloForecast, MonteCarloStats, PercentileRow,
    DEFAULT_SIMULATIONS,
};
pub use regression::{linear_regression, RegressionForecast, TrendDirection};
