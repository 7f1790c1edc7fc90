//! Fixed-window request limiting per client key
//!
//! Each key gets a counter that resets `window_ms` after the first request of
//! its window. Timestamps are caller-supplied milliseconds, so the limiter
//! never reads a clock itself.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Counter state for one key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    /// Millisecond timestamp after which the window has expired
    pub reset_at: u64,
}

impl RateLimitEntry {
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.reset_at
    }
}

pub type RateLimitStore = FxHashMap<String, RateLimitEntry>;

/// Record a request for `key` at `now` and report whether it is allowed.
///
/// A missing or expired entry starts a new window with a count of 1. A live
/// entry below `max_requests` is incremented; a full one is denied and left
/// unchanged.
pub fn allow(
    store: &mut RateLimitStore,
    key: &str,
    now: u64,
    window_ms: u64,
    max_requests: u32,
) -> bool {
    if let Some(entry) = store.get_mut(key) {
        if !entry.is_expired(now) {
            if entry.count >= max_requests {
                return false;
            }
            entry.count += 1;
            return true;
        }
    }

    store.insert(
        key.to_string(),
        RateLimitEntry {
            count: 1,
            reset_at: now.saturating_add(window_ms),
        },
    );
    true
}

/// Drop expired entries once the store has reached `max_keys` entries.
///
/// Below the threshold this does nothing, so the common call is O(1).
pub fn compact(store: &mut RateLimitStore, now: u64, max_keys: usize) {
    if store.len() < max_keys {
        return;
    }
    let before = store.len();
    store.retain(|_, entry| !entry.is_expired(now));
    debug!(removed = before - store.len(), "compacted rate limit store");
}

/// Limiter settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub window_ms: u64,
    pub max_requests: u32,
    pub max_keys: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: 60_000,
            max_requests: 5,
            max_keys: 10_000,
        }
    }
}

/// Thread-safe limiter over a shared key map.
#[derive(Debug, Default)]
pub struct RateLimiter {
    config: RateLimitConfig,
    store: Mutex<RateLimitStore>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            store: Mutex::new(RateLimitStore::default()),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Compact, then count a request for `key`, as one atomic step.
    pub fn check(&self, key: &str, now: u64) -> bool {
        let mut store = self.store.lock();
        compact(&mut store, now, self.config.max_keys);
        let allowed = allow(
            &mut store,
            key,
            now,
            self.config.window_ms,
            self.config.max_requests,
        );
        if !allowed {
            debug!(key, "rate limited");
        }
        allowed
    }

    /// Number of tracked keys
    pub fn tracked_keys(&self) -> usize {
        self.store.lock().len()
    }
}
