//! Client-side rate limiting for outbound API requests
//!
//! Soft/advisory sliding window: callers are never rejected. At the cap the
//! limiter logs a warning and truncates its retained window so admission
//! pressure self-relieves. A strict variant that refused requests at the cap
//! left consumers stuck with no data path during bursts, so the advisory
//! behavior is the one kept.

use chrono::Utc;
use std::sync::Mutex;

use crate::config::RateLimitConfig;

/// Sliding-window request counter shared across fetches.
pub struct RateLimiter {
    window_ms: i64,
    max_requests: usize,
    timestamps: Mutex<Vec<i64>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            window_ms: config.window_secs as i64 * 1000,
            max_requests: config.max_requests,
            timestamps: Mutex::new(Vec::new()),
        }
    }

    /// Record one outbound network attempt. Call once per attempt, not per
    /// cache hit.
    pub fn admit(&self) {
        self.admit_at(Utc::now().timestamp_millis());
    }

    fn admit_at(&self, now_ms: i64) {
        let mut stamps = match self.timestamps.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        stamps.retain(|ts| now_ms - ts < self.window_ms);

        if stamps.len() >= self.max_requests {
            tracing::warn!(
                in_window = stamps.len(),
                max = self.max_requests,
                "client-side rate limit reached; proceeding with fallback behavior"
            );
            let keep = self.max_requests.saturating_sub(1);
            let drop_from_front = stamps.len() - keep;
            stamps.drain(..drop_from_front);
        }

        stamps.push(now_ms);
    }

    #[cfg(test)]
    fn window_len(&self) -> usize {
        match self.timestamps.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(window_secs: u64, max_requests: usize) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            window_secs,
            max_requests,
        })
    }

    #[test]
    fn test_never_rejects_at_the_cap() {
        let limiter = limiter(60, 60);
        let base = 1_000_000i64;

        // 61 admissions inside one simulated window; the 61st warns but the
        // call completes and the retained window stays within the cap.
        for i in 0..61 {
            limiter.admit_at(base + i);
        }
        assert!(limiter.window_len() <= 60);
    }

    #[test]
    fn test_window_prunes_old_entries() {
        let limiter = limiter(60, 60);
        let base = 1_000_000i64;

        for i in 0..30 {
            limiter.admit_at(base + i);
        }
        // One window later everything above has aged out
        limiter.admit_at(base + 60_001);
        assert_eq!(limiter.window_len(), 1);
    }

    #[test]
    fn test_sustained_pressure_stays_bounded() {
        let limiter = limiter(60, 5);
        let base = 2_000_000i64;

        for i in 0..50 {
            limiter.admit_at(base + i);
        }
        assert!(limiter.window_len() <= 5);
    }
}
