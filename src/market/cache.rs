//! Bounded LRU cache with per-entry absolute expiry.
//!
//! Purely a performance layer: the engine behaves identically with caching
//! disabled, only slower, because generation is deterministic for a given
//! key. Keys embed the generation day, so entries go stale naturally at
//! the day rollover even before their TTL fires.

use std::collections::{HashMap, VecDeque};

use crate::core::calendar;
use crate::core::types::Candle;

/// Default maximum number of cached series.
pub const CACHE_MAX_SIZE: usize = 512;

/// Default entry lifetime: 24 hours.
pub const CACHE_TTL_MS: i64 = calendar::DAY_MS;

struct CacheEntry {
    value: Vec<Candle>,
    expires_at: i64,
}

/// LRU + TTL memoization for generated candle series.
pub struct HistoryCache {
    entries: HashMap<String, CacheEntry>,
    // Recency order, least recent at the front. Promotion removes the key
    // and pushes it to the back.
    order: VecDeque<String>,
    max_size: usize,
    ttl_ms: i64,
}

impl HistoryCache {
    /// Create a cache with the default capacity and TTL.
    pub fn new() -> Self {
        Self::with_limits(CACHE_MAX_SIZE, CACHE_TTL_MS)
    }

    /// Create a cache with explicit capacity and TTL.
    pub fn with_limits(max_size: usize, ttl_ms: i64) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_size: max_size.max(1),
            ttl_ms,
        }
    }

    /// Cache key for (symbol, days) at a given instant.
    pub fn key(symbol: &str, days: usize, now_ms: i64) -> String {
        format!("{}:{}:{}", symbol, days, calendar::day_number(now_ms))
    }

    /// Fetch an entry. A hit promotes the key to most-recently-used.
    /// Expiry is checked against the absolute expiry instant, not sliding.
    pub fn get(&mut self, key: &str, now_ms: i64) -> Option<Vec<Candle>> {
        let expired = match self.entries.get(key) {
            None => return None,
            Some(entry) => now_ms > entry.expires_at,
        };

        if expired {
            self.remove(key);
            return None;
        }

        self.promote(key);
        self.entries.get(key).map(|e| e.value.clone())
    }

    /// Insert an entry, evicting the single least-recently-used entry if
    /// at capacity.
    pub fn set(&mut self, key: &str, value: Vec<Candle>, now_ms: i64) {
        if self.entries.contains_key(key) {
            self.remove(key);
        }

        while self.entries.len() >= self.max_size {
            match self.order.pop_front() {
                Some(lru) => {
                    self.entries.remove(&lru);
                }
                None => break,
            }
        }

        self.order.push_back(key.to_string());
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: now_ms + self.ttl_ms,
            },
        );
    }

    /// Number of live entries (including any not yet pruned).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Remove all expired entries; returns how many were dropped.
    pub fn prune(&mut self, now_ms: i64) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, e)| now_ms > e.expires_at)
            .map(|(k, _)| k.clone())
            .collect();
        for key in &expired {
            self.remove(key);
        }
        expired.len()
    }

    fn promote(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
            self.order.push_back(key.to_string());
        }
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }
}

impl Default for HistoryCache {
    fn default() -> Self {
        Self::new()
    }
}
