//! Sliding-window admission control.
//!
//! Each caller identity owns an ordered list of admission instants. A call
//! to [`RateLimiter::admit`] drops instants older than the window, then
//! admits only if fewer than `max_requests` remain. Rejected attempts are
//! not recorded.
//!
//! Windows live in a bounded moka cache with idle expiry equal to the
//! window length: an identity that has been quiet for a full window has no
//! live timestamps left, so dropping its entry loses nothing. Eviction is
//! LRU, so a newly seen identity is always stored and limited.
//!
//! Time comes from [`tokio::time::Instant`], which lets tests drive the
//! window with a paused clock.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use moka::policy::EvictionPolicy;
use tokio::time::Instant;
use tracing::debug;

use crate::telemetry;

/// Identity used when the caller has no session of its own.
pub const DEFAULT_IDENTITY: &str = "user";

/// Configuration for the sliding-window limiter.
///
/// ```rust
/// # use fitzone::RateLimitConfig;
/// # use std::time::Duration;
/// let config = RateLimitConfig::new()
///     .max_requests(5)
///     .window(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Admissions allowed per identity per window. Default: 10.
    pub max_requests: usize,
    /// Length of the trailing window. Default: 60 seconds.
    pub window: Duration,
    /// Identities tracked at once before the least recently used is
    /// dropped. Default: 10,000.
    pub max_identities: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
            max_identities: 10_000,
        }
    }
}

impl RateLimitConfig {
    /// Create a new config with the default quota (10 per minute).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the admissions allowed per window.
    pub fn max_requests(mut self, n: usize) -> Self {
        self.max_requests = n;
        self
    }

    /// Set the window length.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Set how many identities are tracked at once.
    pub fn max_identities(mut self, n: u64) -> Self {
        self.max_identities = n;
        self
    }
}

type Window = Arc<Mutex<VecDeque<Instant>>>;

/// Per-identity sliding-window rate limiter.
pub struct RateLimiter {
    windows: moka::sync::Cache<String, Window>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let windows = moka::sync::Cache::builder()
            .max_capacity(config.max_identities)
            .eviction_policy(EvictionPolicy::lru())
            .time_to_idle(config.window)
            .build();
        Self {
            windows,
            max_requests: config.max_requests,
            window: config.window,
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Try to admit one request for `identity`.
    ///
    /// Returns `false` without recording anything when the identity already
    /// has `max_requests` admissions inside the trailing window.
    pub fn admit(&self, identity: &str) -> bool {
        let window = self.window_for(identity);
        let mut stamps = window.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        self.prune(&mut stamps, now);

        if stamps.len() >= self.max_requests {
            metrics::counter!(telemetry::RATE_LIMIT_REJECTIONS_TOTAL).increment(1);
            debug!(identity, in_window = stamps.len(), "rate limit rejected");
            return false;
        }

        stamps.push_back(now);
        true
    }

    /// Admissions `identity` has left in the current window.
    ///
    /// Does not record anything.
    pub fn remaining(&self, identity: &str) -> usize {
        let Some(window) = self.windows.get(identity) else {
            return self.max_requests;
        };
        let mut stamps = window.lock().unwrap_or_else(PoisonError::into_inner);
        self.prune(&mut stamps, Instant::now());
        self.max_requests.saturating_sub(stamps.len())
    }

    /// Number of identities currently tracked (approximate, see moka docs).
    pub fn tracked_identities(&self) -> u64 {
        self.windows.run_pending_tasks();
        self.windows.entry_count()
    }

    fn window_for(&self, identity: &str) -> Window {
        self.windows
            .get_with_by_ref(identity, || Arc::new(Mutex::new(VecDeque::new())))
    }

    // Timestamps are pushed in order, so expired ones are all at the front.
    fn prune(&self, stamps: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&oldest) = stamps.front() {
            if now.duration_since(oldest) < self.window {
                break;
            }
            stamps.pop_front();
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 10);
        assert_eq!(config.window, Duration::from_secs(60));
    }

    #[test]
    fn zero_quota_rejects_everything() {
        let limiter = RateLimiter::new(&RateLimitConfig::new().max_requests(0));
        assert!(!limiter.admit(DEFAULT_IDENTITY));
        assert_eq!(limiter.remaining(DEFAULT_IDENTITY), 0);
    }

    #[test]
    fn unknown_identity_has_full_quota() {
        let limiter = RateLimiter::default();
        assert_eq!(limiter.remaining("nobody"), 10);
    }
}
