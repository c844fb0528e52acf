//! Integration tests for marketforge market data and the scanner.

use marketforge::core::calendar::{DAY_MS, DEFAULT_MARKET_DAYS};
use marketforge::core::types::AssetCategory;
use marketforge::market::{AssetCatalog, MarketData};
use marketforge::scanner::{scan_at, ScannerCache, SCANNER_CACHE_TTL_MS};

// 2024-01-05, a Friday.
const FRIDAY_MS: i64 = 1_704_412_800_000;

#[test]
fn test_builtin_catalog_coverage() {
    let catalog = AssetCatalog::builtin();
    assert_eq!(catalog.len(), 22);

    // One representative per category.
    assert_eq!(catalog.get("AAPL").unwrap().category, AssetCategory::Stocks);
    assert_eq!(catalog.get("BTC").unwrap().category, AssetCategory::Crypto);
    assert_eq!(
        catalog.get("GOLD").unwrap().category,
        AssetCategory::Commodities
    );
    assert_eq!(
        catalog.get("EURUSD").unwrap().category,
        AssetCategory::Forex
    );
    assert_eq!(catalog.get("SPX").unwrap().category, AssetCategory::Indices);
}

#[test]
fn test_history_is_deterministic_within_day() {
    let market = MarketData::new();
    let asset = market.asset("NVDA").unwrap().clone();

    let morning = market.get_historical_at(&asset, 90, FRIDAY_MS);
    let evening = market.get_historical_at(&asset, 90, FRIDAY_MS + 20 * 3_600_000);

    assert_eq!(morning.len(), evening.len());
    for (a, b) in morning.iter().zip(evening.iter()) {
        assert_eq!(a.close, b.close);
        assert_eq!(a.volume, b.volume);
    }
}

#[test]
fn test_history_changes_across_days() {
    let market = MarketData::new();
    let asset = market.asset("NVDA").unwrap().clone();

    let today = market.get_historical_at(&asset, 90, FRIDAY_MS);
    let tomorrow = market.get_historical_at(&asset, 90, FRIDAY_MS + DAY_MS);

    let same = today
        .iter()
        .zip(tomorrow.iter())
        .all(|(a, b)| a.close == b.close);
    assert!(!same);
}

#[test]
fn test_candle_invariants_across_catalog() {
    let market = MarketData::new();
    for asset in market.catalog().iter() {
        let data = market.get_historical_at(asset, 60, FRIDAY_MS);
        assert!(data.len() >= 2, "{}", asset.symbol);

        for c in &data {
            assert!(c.high >= c.open.max(c.close), "{}", asset.symbol);
            assert!(c.low <= c.open.min(c.close), "{}", asset.symbol);
            assert!(c.low > 0.0, "{}", asset.symbol);
            assert!(c.volume > 0, "{}", asset.symbol);
        }

        // Timestamps strictly increase.
        for w in data.windows(2) {
            assert!(w[0].timestamp < w[1].timestamp);
        }
    }
}

#[test]
fn test_weekly_markets_skip_weekends() {
    let market = MarketData::new();
    let stock = market.asset("AAPL").unwrap().clone();
    let crypto = market.asset("BTC").unwrap().clone();

    let stock_data = market.get_historical_at(&stock, DEFAULT_MARKET_DAYS, FRIDAY_MS);
    let crypto_data = market.get_historical_at(&crypto, DEFAULT_MARKET_DAYS, FRIDAY_MS);

    // Crypto trades every day; stocks lose roughly 2 of 7.
    assert_eq!(crypto_data.len(), DEFAULT_MARKET_DAYS + 1);
    assert!(stock_data.len() < crypto_data.len());
    let ratio = stock_data.len() as f64 / crypto_data.len() as f64;
    assert!((0.68..=0.75).contains(&ratio));
}

#[test]
fn test_scanner_covers_catalog_sorted() {
    let market = MarketData::new();
    let results = scan_at(&market, FRIDAY_MS).unwrap();

    assert_eq!(results.len(), market.catalog().len());
    for w in results.windows(2) {
        assert!(w[0].composite_score >= w[1].composite_score);
    }
}

#[test]
fn test_scanner_cache_expiry() {
    let market = MarketData::new();
    let mut cache = ScannerCache::new();

    cache.get_or_scan(&market, FRIDAY_MS).unwrap();
    assert!(cache.get(FRIDAY_MS + SCANNER_CACHE_TTL_MS - 1).is_some());
    assert!(cache.get(FRIDAY_MS + SCANNER_CACHE_TTL_MS).is_none());
}

#[test]
fn test_candles_serialize_cleanly() {
    let market = MarketData::new();
    let asset = market.asset("V").unwrap().clone();
    let data = market.get_historical_at(&asset, 5, FRIDAY_MS);

    let json = serde_json::to_value(&data).unwrap();
    let first = &json[0];
    assert!(first["date"].is_string());
    assert!(first["close"].is_number());
    assert!(first["volume"].is_number());
}
