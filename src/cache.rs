//! Response cache for generated answers.
//!
//! [`ResponseCache`] maps a question to the answer generated for it. Keys
//! are the raw question text under a fixed namespace: no trimming or case
//! folding, so `"Hours?"` and `"hours? "` are cached separately.
//!
//! Every entry records when it was stored. A lookup only returns entries
//! younger than the TTL; older ones are reported as misses and left in
//! place. Physical removal is moka's job: the cache is bounded by entry
//! count and moka drops entries past their time-to-live during its own
//! housekeeping. When full, the least recently used answer makes room for
//! the newest one.
//!
//! The age check uses [`tokio::time::Instant`] so expiry can be tested
//! against a paused clock.

use std::time::Duration;

use moka::future::Cache;
use moka::policy::EvictionPolicy;
use tokio::time::Instant;

use crate::telemetry;

/// Namespace prepended to every question to form its key.
pub const KEY_NAMESPACE: &str = "gym:";

/// Configuration for the response cache.
///
/// ```rust
/// # use fitzone::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(500)
///     .ttl(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached answers. Default: 1,000.
    pub max_entries: u64,
    /// How long an answer stays valid. Default: 5 minutes.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached answers.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached answers.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    answer: String,
    created_at: Instant,
}

/// In-memory, bounded, TTL-checked answer cache.
pub struct ResponseCache {
    entries: Cache<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(config: &CacheConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            .eviction_policy(EvictionPolicy::lru())
            .time_to_live(config.ttl)
            .build();
        Self {
            entries,
            ttl: config.ttl,
        }
    }

    /// Return the stored answer for `question` if it is younger than the TTL.
    pub async fn lookup(&self, question: &str) -> Option<String> {
        let key = cache_key(question);
        match self.entries.get(&key).await {
            Some(entry) if entry.created_at.elapsed() < self.ttl => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                Some(entry.answer)
            }
            _ => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Store (or overwrite) the answer for `question`, stamped now.
    pub async fn store(&self, question: &str, answer: impl Into<String>) {
        let entry = CacheEntry {
            answer: answer.into(),
            created_at: Instant::now(),
        };
        self.entries.insert(cache_key(question), entry).await;
    }

    /// Whether an entry for `question` is physically held, fresh or not.
    pub fn contains(&self, question: &str) -> bool {
        self.entries.contains_key(&cache_key(question))
    }

    /// Number of entries currently held, including stale ones not yet
    /// evicted.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

fn cache_key(question: &str) -> String {
    format!("{KEY_NAMESPACE}{question}")
}
