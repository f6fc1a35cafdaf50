//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus,
//! statsd); without a recorder installed, all metric calls are no-ops.
//!
//! All metrics are prefixed with `fitzone_`. Counters end in `_total`,
//! histograms carry their unit (`_seconds`).
//!
//! # Common labels
//!
//! - `outcome` — `"answered"`, `"cached"` or an [`ErrorKind`](crate::ErrorKind) label
//! - `status` — upstream result: `"ok"` or `"error"`

/// Questions handled by the trainer, one per `answer` call.
///
/// Labels: `outcome`.
pub const ANSWERS_TOTAL: &str = "fitzone_answers_total";

/// Questions rejected by the local sliding-window limiter.
pub const RATE_LIMIT_REJECTIONS_TOTAL: &str = "fitzone_rate_limit_rejections_total";

/// Response cache hits.
pub const CACHE_HITS_TOTAL: &str = "fitzone_cache_hits_total";

/// Response cache misses (absent or expired).
pub const CACHE_MISSES_TOTAL: &str = "fitzone_cache_misses_total";

/// Upstream generation requests issued.
///
/// Labels: `status` ("ok" | "error").
pub const UPSTREAM_REQUESTS_TOTAL: &str = "fitzone_upstream_requests_total";

/// Upstream generation round-trip duration in seconds.
pub const UPSTREAM_DURATION_SECONDS: &str = "fitzone_upstream_duration_seconds";
