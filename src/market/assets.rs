//! Built-in instrument catalog.
//!
//! The catalog is constructed explicitly at process start and handed to
//! whatever context owns the engine; there is no module-level mutable
//! state. Symbols are unique and configuration is immutable for the
//! process lifetime.

use std::collections::BTreeMap;

use crate::core::types::{AssetCategory, AssetConfig};

/// Symbol-keyed table of instrument configurations.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    assets: BTreeMap<String, AssetConfig>,
}

impl AssetCatalog {
    /// Build a catalog from explicit configs. Later duplicates replace
    /// earlier ones.
    pub fn new(configs: impl IntoIterator<Item = AssetConfig>) -> Self {
        let assets = configs
            .into_iter()
            .map(|c| (c.symbol.clone(), c))
            .collect();
        Self { assets }
    }

    /// The built-in 22-instrument demo catalog.
    pub fn builtin() -> Self {
        use AssetCategory::*;

        fn cfg(
            symbol: &str,
            name: &str,
            category: AssetCategory,
            base_price: f64,
            volatility: f64,
            trend: f64,
            beta: f64,
            dividend_yield: f64,
            sector: Option<&str>,
        ) -> AssetConfig {
            AssetConfig {
                symbol: symbol.to_string(),
                name: name.to_string(),
                category,
                base_price,
                volatility,
                trend,
                beta,
                dividend_yield,
                sector: sector.map(str::to_string),
            }
        }

        Self::new([
            // Stocks
            cfg("AAPL", "Apple Inc.", Stocks, 198.5, 0.022, 0.0003, 1.2, 0.005, Some("Technology")),
            cfg("MSFT", "Microsoft Corp.", Stocks, 415.8, 0.020, 0.0004, 1.1, 0.008, Some("Technology")),
            cfg("GOOGL", "Alphabet Inc.", Stocks, 175.2, 0.024, 0.0003, 1.15, 0.0, Some("Technology")),
            cfg("AMZN", "Amazon.com", Stocks, 205.7, 0.026, 0.0004, 1.3, 0.0, Some("Technology")),
            cfg("TSLA", "Tesla Inc.", Stocks, 245.3, 0.042, 0.0002, 1.8, 0.0, Some("Automotive")),
            cfg("NVDA", "NVIDIA Corp.", Stocks, 875.4, 0.035, 0.0006, 1.6, 0.001, Some("Technology")),
            cfg("JPM", "JPMorgan Chase", Stocks, 198.6, 0.018, 0.0002, 1.05, 0.025, Some("Finance")),
            cfg("V", "Visa Inc.", Stocks, 282.1, 0.016, 0.0003, 0.95, 0.007, Some("Finance")),
            // Crypto
            cfg("BTC", "Bitcoin", Crypto, 97_500.0, 0.038, 0.0005, 2.0, 0.0, None),
            cfg("ETH", "Ethereum", Crypto, 3_420.0, 0.045, 0.0004, 2.2, 0.0, None),
            cfg("SOL", "Solana", Crypto, 198.0, 0.055, 0.0006, 2.5, 0.0, None),
            cfg("BNB", "Binance Coin", Crypto, 615.0, 0.035, 0.0003, 1.8, 0.0, None),
            // Commodities
            cfg("GOLD", "Gold", Commodities, 2_045.0, 0.012, 0.0002, 0.3, 0.0, None),
            cfg("SILVER", "Silver", Commodities, 24.8, 0.018, 0.0001, 0.5, 0.0, None),
            cfg("OIL", "Crude Oil WTI", Commodities, 78.5, 0.025, -0.0001, 0.8, 0.0, None),
            cfg("NATGAS", "Natural Gas", Commodities, 2.85, 0.035, -0.0002, 0.7, 0.0, None),
            // Forex
            cfg("EURUSD", "EUR/USD", Forex, 1.0875, 0.006, 0.00001, 0.2, 0.0, None),
            cfg("GBPUSD", "GBP/USD", Forex, 1.268, 0.007, 0.00002, 0.25, 0.0, None),
            cfg("USDJPY", "USD/JPY", Forex, 149.5, 0.008, 0.0001, 0.3, 0.0, None),
            // Indices
            cfg("SPX", "S&P 500", Indices, 5_088.0, 0.012, 0.0003, 1.0, 0.014, None),
            cfg("NDX", "NASDAQ 100", Indices, 17_985.0, 0.016, 0.0004, 1.2, 0.007, None),
            cfg("DJI", "Dow Jones", Indices, 38_654.0, 0.01, 0.0002, 0.9, 0.018, None),
        ])
    }

    /// Look up a symbol.
    #[inline]
    pub fn get(&self, symbol: &str) -> Option<&AssetConfig> {
        self.assets.get(symbol)
    }

    /// Whether the catalog contains a symbol.
    #[inline]
    pub fn contains(&self, symbol: &str) -> bool {
        self.assets.contains_key(symbol)
    }

    /// Iterate configs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = &AssetConfig> {
        self.assets.values()
    }

    /// Number of instruments.
    #[inline]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
