//! Tests for [`RateLimiter`] — per-identity sliding window.
//!
//! The limiter reads `tokio::time::Instant`, so these run on a paused
//! clock and move time with `tokio::time::advance`.

use std::time::Duration;

use fitzone::{DEFAULT_IDENTITY, RateLimitConfig, RateLimiter};

const WINDOW: Duration = Duration::from_secs(60);

#[tokio::test(start_paused = true)]
async fn eleventh_request_in_window_is_rejected() {
    let limiter = RateLimiter::default();

    for i in 0..10 {
        assert!(limiter.admit(DEFAULT_IDENTITY), "request {i} should be admitted");
        tokio::time::advance(Duration::from_secs(1)).await;
    }
    assert!(!limiter.admit(DEFAULT_IDENTITY));
}

#[tokio::test(start_paused = true)]
async fn admission_resumes_once_window_passes_first_attempt() {
    let limiter = RateLimiter::default();

    for _ in 0..10 {
        assert!(limiter.admit(DEFAULT_IDENTITY));
    }
    assert!(!limiter.admit(DEFAULT_IDENTITY));

    tokio::time::advance(WINDOW - Duration::from_millis(1)).await;
    assert!(!limiter.admit(DEFAULT_IDENTITY));

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(limiter.admit(DEFAULT_IDENTITY));
}

#[tokio::test(start_paused = true)]
async fn rejected_attempts_are_not_recorded() {
    let limiter = RateLimiter::new(&RateLimitConfig::new().max_requests(2));

    assert!(limiter.admit("a"));
    assert!(limiter.admit("a"));

    // Keep knocking for most of the window.
    for _ in 0..5 {
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(!limiter.admit("a"));
    }

    // Only the two admissions at t=0 count, and both have aged out.
    tokio::time::advance(Duration::from_secs(10)).await;
    assert!(limiter.admit("a"));
    assert!(limiter.admit("a"));
    assert!(!limiter.admit("a"));
}

#[tokio::test(start_paused = true)]
async fn window_slides_rather_than_resetting() {
    let limiter = RateLimiter::default();

    for _ in 0..5 {
        assert!(limiter.admit(DEFAULT_IDENTITY));
    }
    tokio::time::advance(Duration::from_secs(30)).await;
    for _ in 0..5 {
        assert!(limiter.admit(DEFAULT_IDENTITY));
    }
    assert!(!limiter.admit(DEFAULT_IDENTITY));

    // t=60: the first five have expired, the second five have not.
    tokio::time::advance(Duration::from_secs(30)).await;
    assert_eq!(limiter.remaining(DEFAULT_IDENTITY), 5);
    for _ in 0..5 {
        assert!(limiter.admit(DEFAULT_IDENTITY));
    }
    assert!(!limiter.admit(DEFAULT_IDENTITY));
}

#[tokio::test(start_paused = true)]
async fn identities_have_independent_quotas() {
    let limiter = RateLimiter::new(&RateLimitConfig::new().max_requests(3));

    for _ in 0..3 {
        assert!(limiter.admit("alice"));
    }
    assert!(!limiter.admit("alice"));

    assert!(limiter.admit("bob"));
    assert_eq!(limiter.remaining("bob"), 2);
    assert_eq!(limiter.remaining("alice"), 0);
}

#[tokio::test(start_paused = true)]
async fn remaining_does_not_consume_quota() {
    let limiter = RateLimiter::new(&RateLimitConfig::new().max_requests(1));

    assert_eq!(limiter.remaining("carol"), 1);
    assert_eq!(limiter.remaining("carol"), 1);
    assert!(limiter.admit("carol"));
    assert_eq!(limiter.remaining("carol"), 0);
}

#[tokio::test(start_paused = true)]
async fn custom_window_is_honoured() {
    let limiter = RateLimiter::new(
        &RateLimitConfig::new()
            .max_requests(1)
            .window(Duration::from_secs(5)),
    );

    assert!(limiter.admit("dave"));
    assert!(!limiter.admit("dave"));
    tokio::time::advance(Duration::from_secs(5)).await;
    assert!(limiter.admit("dave"));
}

#[test]
fn tracked_identities_are_bounded() {
    let limiter = RateLimiter::new(&RateLimitConfig::new().max_identities(8));
    for i in 0..100 {
        limiter.admit(&format!("guest-{i}"));
    }
    assert!(limiter.tracked_identities() <= 8);
}

#[tokio::test(start_paused = true)]
async fn newcomer_is_limited_when_arena_is_full() {
    let limiter = RateLimiter::new(&RateLimitConfig::new().max_identities(4));

    // Four busy regulars fill the arena.
    for _ in 0..10 {
        for regular in ["r0", "r1", "r2", "r3"] {
            assert!(limiter.admit(regular));
        }
    }

    for i in 0..10 {
        assert!(limiter.admit("newcomer"), "request {i} should be admitted");
    }
    for _ in 0..20 {
        assert!(!limiter.admit("newcomer"));
    }
    assert_eq!(limiter.remaining("newcomer"), 0);
}
