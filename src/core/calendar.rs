//! Trading-calendar helpers.
//!
//! Weekend handling is a pure predicate over (date, category) so it can be
//! tested independently of the generation loop. Crypto and Forex trade
//! seven days a week; everything else skips Saturday and Sunday.

use chrono::{DateTime, Datelike, Utc, Weekday};

use super::types::AssetCategory;

/// Milliseconds in one calendar day.
pub const DAY_MS: i64 = 86_400_000;

/// Default history length in days.
pub const DEFAULT_MARKET_DAYS: usize = 365;

/// Days since the Unix epoch for an epoch-millis timestamp. Used both as
/// the daily seed component and as the cache-key generation day, so series
/// are stable within a calendar day and roll over at midnight UTC.
#[inline]
pub fn day_number(epoch_ms: i64) -> i64 {
    epoch_ms.div_euclid(DAY_MS)
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn datetime(epoch_ms: i64) -> DateTime<Utc> {
    // Out-of-range instants clamp to the epoch.
    DateTime::<Utc>::from_timestamp_millis(epoch_ms).unwrap_or_default()
}

/// ISO calendar day (YYYY-MM-DD, UTC) for an epoch-millis timestamp.
pub fn iso_date(epoch_ms: i64) -> String {
    datetime(epoch_ms).format("%Y-%m-%d").to_string()
}

/// Whether the given day is a trading day for the category.
pub fn is_trading_day(epoch_ms: i64, category: AssetCategory) -> bool {
    if category.is_continuous() {
        return true;
    }
    !matches!(datetime(epoch_ms).weekday(), Weekday::Sat | Weekday::Sun)
}
