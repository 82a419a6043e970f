//! Minimum spacing between product-detail requests

use crate::config::RateLimitConfig;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between consecutive calls to [`RateLimiter::wait`]
///
/// The instant of the last permitted call is kept under an async mutex and the
/// sleep happens while the lock is held, so the spacing holds globally even when
/// several tasks share one limiter.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Build from the provider rate-limit configuration
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(Duration::from_millis(config.min_interval_ms))
    }

    /// Configured minimum interval
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Block until at least `min_interval` has passed since the previous call
    pub async fn wait(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(last) = *last_call {
            let ready_at = last + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                tracing::trace!(
                    wait_ms = (ready_at - now).as_millis() as u64,
                    "Rate limiting product request"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_call_does_not_wait() {
        let limiter = RateLimiter::new(Duration::from_secs(5));
        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_consecutive_calls_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(40));
        let start = Instant::now();

        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;

        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn test_spacing_holds_across_tasks() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(30)));
        let start = Instant::now();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move { limiter.wait().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(start.elapsed() >= Duration::from_millis(90));
    }

    #[test]
    fn test_from_config_default() {
        let limiter = RateLimiter::from_config(&RateLimitConfig::default());
        assert_eq!(limiter.min_interval(), Duration::from_millis(1200));
    }
}
