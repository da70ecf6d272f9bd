//! Fixed-window attempt limiter used to throttle registration.
//!
//! [`RateLimitStore`] is the seam: the API state holds an
//! `Arc<dyn RateLimitStore>`, so a shared store (e.g. a cache service) can be
//! swapped in for multi-instance deployments. [`FixedWindowLimiter`] is the
//! in-process implementation; its map is guarded by a mutex and swept of
//! elapsed windows so key cardinality stays bounded by recent traffic.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Duration;

use crate::types::Timestamp;

/// Default window length for registration attempts.
pub const DEFAULT_WINDOW_SECS: i64 = 5 * 60;

/// Default number of attempts allowed per window.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Number of tracked keys above which [`FixedWindowLimiter::hit`] sweeps
/// elapsed entries before recording a new one.
pub const DEFAULT_SWEEP_THRESHOLD: usize = 1024;

/// Outcome of recording one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited,
}

impl RateDecision {
    pub fn is_allowed(self) -> bool {
        self == RateDecision::Allowed
    }
}

/// A counter store keyed by client.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record one attempt for `key` at `now` and decide whether it may proceed.
    async fn hit(&self, key: &str, now: Timestamp) -> RateDecision;
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    window_start: Timestamp,
}

/// In-process fixed-window limiter.
///
/// Per call: if the key's window elapsed (`now - start > window`) the count
/// restarts from zero; the count is incremented; the attempt is limited when
/// the count exceeds `max_attempts`.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    window: Duration,
    max_attempts: u32,
    sweep_threshold: usize,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl FixedWindowLimiter {
    pub fn new(window: Duration, max_attempts: u32) -> Self {
        Self {
            window,
            max_attempts,
            sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Override the key count that triggers an automatic sweep.
    pub fn with_sweep_threshold(mut self, threshold: usize) -> Self {
        self.sweep_threshold = threshold;
        self
    }

    /// Record an attempt synchronously. See [`RateLimitStore::hit`].
    pub fn check(&self, key: &str, now: Timestamp) -> RateDecision {
        let mut entries = self.lock();

        if entries.len() >= self.sweep_threshold && !entries.contains_key(key) {
            Self::retain_live(&mut entries, self.window, now);
        }

        let entry = entries.entry(key.to_string()).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        if now - entry.window_start > self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count = entry.count.saturating_add(1);

        if entry.count > self.max_attempts {
            RateDecision::Limited
        } else {
            RateDecision::Allowed
        }
    }

    /// Drop every entry whose window has elapsed. Returns the number removed.
    pub fn sweep(&self, now: Timestamp) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        Self::retain_live(&mut entries, self.window, now);
        before - entries.len()
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.lock().len()
    }

    fn retain_live(entries: &mut HashMap<String, WindowEntry>, window: Duration, now: Timestamp) {
        entries.retain(|_, e| now - e.window_start <= window);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, WindowEntry>> {
        // Counters remain consistent even if a holder panicked.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for FixedWindowLimiter {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_WINDOW_SECS), DEFAULT_MAX_ATTEMPTS)
    }
}

#[async_trait]
impl RateLimitStore for FixedWindowLimiter {
    async fn hit(&self, key: &str, now: Timestamp) -> RateDecision {
        self.check(key, now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn sixth_attempt_in_window_is_limited() {
        let limiter = FixedWindowLimiter::default();
        let start = Utc::now();

        for i in 0..5 {
            let now = start + Duration::seconds(i * 10);
            assert_eq!(limiter.check("10.0.0.1", now), RateDecision::Allowed, "attempt {}", i + 1);
        }
        assert_eq!(
            limiter.check("10.0.0.1", start + Duration::seconds(60)),
            RateDecision::Limited
        );
        assert_eq!(
            limiter.check("10.0.0.1", start + Duration::seconds(61)),
            RateDecision::Limited
        );
    }

    #[test]
    fn window_elapse_resets_the_count() {
        let limiter = FixedWindowLimiter::default();
        let start = Utc::now();

        for _ in 0..5 {
            assert!(limiter.check("k", start).is_allowed());
        }
        assert_eq!(limiter.check("k", start), RateDecision::Limited);

        let later = start + Duration::seconds(DEFAULT_WINDOW_SECS + 1);
        assert_eq!(limiter.check("k", later), RateDecision::Allowed);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let limiter = FixedWindowLimiter::new(Duration::seconds(300), 1);
        let start = Utc::now();
        assert!(limiter.check("k", start).is_allowed());
        // Exactly `window` later the window has not yet elapsed.
        assert_eq!(limiter.check("k", start + Duration::seconds(300)), RateDecision::Limited);
    }

    #[test]
    fn keys_are_independent() {
        let limiter = FixedWindowLimiter::new(Duration::seconds(300), 1);
        let now = Utc::now();
        assert!(limiter.check("a", now).is_allowed());
        assert!(limiter.check("b", now).is_allowed());
        assert_eq!(limiter.check("a", now), RateDecision::Limited);
    }

    #[test]
    fn sweep_drops_elapsed_windows() {
        let limiter = FixedWindowLimiter::default();
        let start = Utc::now();
        limiter.check("old", start);
        limiter.check("fresh", start + Duration::seconds(DEFAULT_WINDOW_SECS));

        let removed = limiter.sweep(start + Duration::seconds(DEFAULT_WINDOW_SECS + 1));
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[test]
    fn crossing_the_threshold_triggers_a_sweep() {
        let limiter = FixedWindowLimiter::default().with_sweep_threshold(2);
        let start = Utc::now();
        limiter.check("a", start);
        limiter.check("b", start);

        let later = start + Duration::seconds(DEFAULT_WINDOW_SECS + 1);
        limiter.check("c", later);
        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[tokio::test]
    async fn store_trait_delegates_to_check() {
        let store: Box<dyn RateLimitStore> = Box::new(FixedWindowLimiter::new(Duration::seconds(60), 1));
        let now = Utc::now();
        assert_eq!(store.hit("ip", now).await, RateDecision::Allowed);
        assert_eq!(store.hit("ip", now).await, RateDecision::Limited);
    }
}
