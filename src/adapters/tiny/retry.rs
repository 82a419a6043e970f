//! Bounded retry with a fixed delay
//!
//! Every provider call goes through [`RetryPolicy::run`]. Exhausting the attempts does
//! not raise: it yields [`Fetch::Unavailable`] so each call site can decide whether to
//! skip (page, order, item) or end the listing.

use crate::config::RetryConfig;
use crate::domain::ProviderError;
use crate::log_retry_attempt;
use std::future::Future;
use std::time::Duration;

/// Outcome of a retried provider call
#[derive(Debug)]
pub enum Fetch<T> {
    /// The call succeeded
    Ready(T),

    /// Every attempt failed
    Unavailable {
        /// Number of attempts made
        attempts: usize,
        /// Error of the final attempt
        last_error: ProviderError,
    },
}

impl<T> Fetch<T> {
    /// Converts into an `Option`, dropping the failure details
    pub fn ready(self) -> Option<T> {
        match self {
            Fetch::Ready(value) => Some(value),
            Fetch::Unavailable { .. } => None,
        }
    }

    /// Whether the call exhausted its attempts
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Fetch::Unavailable { .. })
    }
}

/// Fixed-interval retry policy
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: usize,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy making at most `max_retries` attempts (at least one)
    pub fn new(max_retries: usize, delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            delay,
        }
    }

    /// Build from the provider retry configuration
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_retries, Duration::from_millis(config.delay_ms))
    }

    /// Maximum number of attempts
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Run `operation` until it succeeds or the attempts are exhausted
    ///
    /// Each failure is logged and followed by a fixed sleep, except the last one.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Fetch<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => return Fetch::Ready(value),
                Err(e) if attempt >= self.max_retries => {
                    tracing::error!(
                        call = label,
                        attempts = attempt,
                        error = %e,
                        "Request failed after all retries"
                    );
                    return Fetch::Unavailable {
                        attempts: attempt,
                        last_error: e,
                    };
                }
                Err(e) => {
                    let reason = e.to_string();
                    log_retry_attempt!(attempt, self.max_retries, reason.as_str());
                    tracing::debug!(
                        call = label,
                        delay_ms = self.delay.as_millis() as u64,
                        "Backing off"
                    );
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
