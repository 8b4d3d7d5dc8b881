use std::sync::Arc;

use chrono::Utc;
use reqwest::header::HeaderMap;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

use crate::error::{Error, Result};

const SOFT_LIMIT_PER_MINUTE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub remaining: u32,
    pub reset: Option<i64>,
}

impl RateLimitSnapshot {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())?;
        let reset = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());

        Some(Self { remaining, reset })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    pub fn seconds_until_reset(&self, now: i64) -> u64 {
        self.reset.map(|r| (r - now).max(0) as u64).unwrap_or(0)
    }
}

struct RateLimitState {
    last: Option<RateLimitSnapshot>,
    requests_this_minute: u32,
    minute_start: Instant,
}

pub struct RateLimiter {
    state: Arc<Mutex<RateLimitState>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RateLimitState {
                last: None,
                requests_this_minute: 0,
                minute_start: Instant::now(),
            })),
        }
    }

    pub async fn acquire(&self) -> Result<()> {
        let mut state = self.state.lock().await;

        if let Some(snapshot) = state.last.filter(|s| s.is_exhausted()) {
            let wait = snapshot.seconds_until_reset(Utc::now().timestamp());
            if wait > 0 {
                tracing::warn!("Rate limit exhausted, resets in {}s", wait);
                return Err(Error::RateLimited(wait));
            }
            state.last = None;
        }

        let minute_elapsed = state.minute_start.elapsed();
        if minute_elapsed < Duration::from_secs(60) {
            if state.requests_this_minute >= SOFT_LIMIT_PER_MINUTE {
                let wait_time = Duration::from_secs(60) - minute_elapsed;
                drop(state);
                tracing::debug!("Soft rate limiting, waiting {:?}", wait_time);
                sleep(wait_time).await;
                state = self.state.lock().await;
                state.requests_this_minute = 0;
                state.minute_start = Instant::now();
            }
        } else {
            state.requests_this_minute = 0;
            state.minute_start = Instant::now();
        }

        state.requests_this_minute += 1;
        Ok(())
    }

    pub async fn update_from_headers(&self, headers: &HeaderMap) {
        if let Some(snapshot) = RateLimitSnapshot::from_headers(headers) {
            tracing::debug!("Rate limit remaining: {}", snapshot.remaining);
            self.state.lock().await.last = Some(snapshot);
        }
    }

    pub async fn seconds_until_reset(&self) -> u64 {
        self.state
            .lock()
            .await
            .last
            .map(|s| s.seconds_until_reset(Utc::now().timestamp()))
            .unwrap_or(0)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(remaining: &str, reset: i64) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert("x-ratelimit-remaining", HeaderValue::from_str(remaining).unwrap());
        map.insert("x-ratelimit-reset", HeaderValue::from_str(&reset.to_string()).unwrap());
        map
    }

    #[test]
    fn test_snapshot_from_headers() {
        let snapshot = RateLimitSnapshot::from_headers(&headers("0", 1_700_000_060)).unwrap();
        assert!(snapshot.is_exhausted());
        assert_eq!(snapshot.seconds_until_reset(1_700_000_000), 60);
        assert_eq!(snapshot.seconds_until_reset(1_800_000_000), 0);
        assert_eq!(RateLimitSnapshot::from_headers(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_exhausted_quota_fails_fast() {
        let limiter = RateLimiter::new();
        assert!(limiter.acquire().await.is_ok());

        let reset = Utc::now().timestamp() + 120;
        limiter.update_from_headers(&headers("0", reset)).await;
        match limiter.acquire().await {
            Err(Error::RateLimited(secs)) => assert!(secs > 0 && secs <= 120),
            other => panic!("expected rate limit error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_elapsed_reset_clears_exhaustion() {
        let limiter = RateLimiter::new();
        limiter
            .update_from_headers(&headers("0", Utc::now().timestamp() - 5))
            .await;
        assert!(limiter.acquire().await.is_ok());
        assert_eq!(limiter.seconds_until_reset().await, 0);
    }
}
