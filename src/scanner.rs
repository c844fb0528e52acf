//! Market scanner: rank the whole catalog by composite score.

use serde::Serialize;
use tracing::{debug, info};

use crate::core::calendar::{self, DEFAULT_MARKET_DAYS};
use crate::core::types::{round_to, AssetCategory};
use crate::core::Result;
use crate::forecast::{composite_score_at, monte_carlo_at, Confidence, Recommendation};
use crate::market::MarketData;

/// How long a scan result stays fresh.
pub const SCANNER_CACHE_TTL_MS: i64 = 5 * 60 * 1000;

/// Horizon of the per-asset Monte Carlo ranking run.
const SCAN_HORIZON_DAYS: usize = 30;

/// Path count for the ranking run. Coarse on purpose; the scanner ranks,
/// it does not quote.
const SCAN_SIMULATIONS: usize = 50;

/// One scanner row.
#[derive(Debug, Clone, Serialize)]
pub struct ScannerItem {
    pub symbol: String,
    pub name: String,
    pub category: AssetCategory,
    pub price: f64,
    /// Last close vs previous close, percent.
    pub change: f64,
    pub composite_score: f64,
    pub recommendation: Recommendation,
    pub confidence: Confidence,
    pub expected_return: f64,
    pub bullish_probability: f64,
    pub volatility: f64,
}

/// Scan the full catalog against the wall clock.
pub fn scan(market: &MarketData) -> Result<Vec<ScannerItem>> {
    scan_at(market, calendar::now_ms())
}

/// Scan the full catalog, sorted by composite score descending.
pub fn scan_at(market: &MarketData, now_ms: i64) -> Result<Vec<ScannerItem>> {
    let mut results = Vec::with_capacity(market.catalog().len());

    for asset in market.catalog().iter() {
        let data = market.get_historical_at(asset, DEFAULT_MARKET_DAYS, now_ms);
        let composite = composite_score_at(&data, now_ms)?;
        let mc = monte_carlo_at(&data, SCAN_HORIZON_DAYS, SCAN_SIMULATIONS, now_ms)?;

        // History always holds at least two candles, so the day-over-day
        // change is well defined.
        let last = &data[data.len() - 1];
        let prev = &data[data.len() - 2];

        debug!(symbol = %asset.symbol, score = composite.score, "scanned");

        results.push(ScannerItem {
            symbol: asset.symbol.clone(),
            name: asset.name.clone(),
            category: asset.category,
            price: last.close,
            change: round_to((last.close - prev.close) / prev.close * 100.0, 2),
            composite_score: composite.score,
            recommendation: composite.recommendation,
            confidence: composite.confidence,
            expected_return: mc.statistics.expected_return,
            bullish_probability: mc.statistics.bullish_probability,
            volatility: mc.statistics.volatility,
        });
    }

    results.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    info!(assets = results.len(), "scan complete");
    Ok(results)
}

/// Short-lived scan result cache, owned by the caller.
#[derive(Debug, Default)]
pub struct ScannerCache {
    entry: Option<(Vec<ScannerItem>, i64)>,
}

impl ScannerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached scan, if still fresh.
    pub fn get(&self, now_ms: i64) -> Option<&[ScannerItem]> {
        match &self.entry {
            Some((items, expires_at)) if now_ms < *expires_at => Some(items),
            _ => None,
        }
    }

    /// Replace the cached scan, fresh for the TTL from `now_ms`.
    pub fn store(&mut self, items: Vec<ScannerItem>, now_ms: i64) {
        self.entry = Some((items, now_ms + SCANNER_CACHE_TTL_MS));
    }

    /// Serve from cache or run a fresh scan and cache it.
    pub fn get_or_scan(&mut self, market: &MarketData, now_ms: i64) -> Result<Vec<ScannerItem>> {
        if let Some(items) = self.get(now_ms) {
            debug!("scanner cache hit");
            return Ok(items.to_vec());
        }
        let items = scan_at(market, now_ms)?;
        self.store(items.clone(), now_ms);
        Ok(items)
    }
}
