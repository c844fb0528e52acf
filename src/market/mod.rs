//! Market data service: asset catalog, synthetic generation, history cache.

pub mod assets;
pub mod cache;
pub mod generator;

pub use assets::AssetCatalog;
pub use cache::{HistoryCache, CACHE_MAX_SIZE, CACHE_TTL_MS};
pub use generator::{generate_history, generate_history_at};

use std::sync::Mutex;

use tracing::trace;

use crate::core::calendar;
use crate::core::error::{ForgeError, Result};
use crate::core::types::{AssetConfig, Candle};

/// Process-wide market data context: the immutable catalog plus the
/// injectable history cache. Constructed once at startup and shared.
///
/// Concurrent callers may race to regenerate the same series; that wastes
/// CPU but never produces inconsistent results, since generation is
/// deterministic for a given cache key. The cache lock is therefore not
/// held across generation.
pub struct MarketData {
    catalog: AssetCatalog,
    cache: Mutex<HistoryCache>,
}

impl MarketData {
    /// Create a context over the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(AssetCatalog::builtin())
    }

    /// Create a context over an explicit catalog.
    pub fn with_catalog(catalog: AssetCatalog) -> Self {
        Self {
            catalog,
            cache: Mutex::new(HistoryCache::new()),
        }
    }

    /// The instrument catalog.
    #[inline]
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// Resolve a symbol or fail with `UnknownSymbol`.
    pub fn asset(&self, symbol: &str) -> Result<&AssetConfig> {
        self.catalog
            .get(symbol)
            .ok_or_else(|| ForgeError::unknown_symbol(symbol))
    }

    /// Cached historical series for an asset. The requested day count is
    /// clamped to a minimum of 2 so downstream return-based statistics
    /// always have at least one day-over-day change to work with.
    pub fn get_historical(&self, asset: &AssetConfig, days: usize) -> Vec<Candle> {
        self.get_historical_at(asset, days, calendar::now_ms())
    }

    /// Cached lookup against an explicit clock, for deterministic tests.
    pub fn get_historical_at(&self, asset: &AssetConfig, days: usize, now_ms: i64) -> Vec<Candle> {
        let days = days.max(2);
        let key = HistoryCache::key(&asset.symbol, days, now_ms);

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key, now_ms) {
                trace!(%key, "history cache hit");
                return hit;
            }
        }

        // Lock released while generating; a concurrent miss on the same
        // key regenerates an identical series.
        let generated = generator::generate_history_at(asset, days, now_ms);

        if let Ok(mut cache) = self.cache.lock() {
            cache.set(&key, generated.clone(), now_ms);
        }

        generated
    }

    /// Number of series currently cached.
    pub fn cache_size(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Drop all cached series.
    pub fn flush_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }
}

impl Default for MarketData {
    fn default() -> Self {
        Self::new()
    }
}
