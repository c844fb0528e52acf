//! Portfolio construction: correlations and risk-weighted allocation.

pub mod correlation;
pub mod optimizer;

pub use correlation::correlation_matrix;
pub use optimizer::{
    optimize, optimize_at, Allocation, CorrelationMatrix, PortfolioMetrics, PortfolioResult,
};
