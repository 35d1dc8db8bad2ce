//! Bounded retry with exponential backoff.
//!
//! The executor only sees an async operation and a [`Retryable`] error;
//! it knows nothing about providers.

use std::future::Future;
use std::time::Duration;

use meridian_core::{ProviderConfig, ProviderError};
use meridian_observability::tracing_setup::events;

/// Classification the retry loop needs from an error.
pub trait Retryable {
    fn is_retryable(&self) -> bool;

    /// Minimum wait requested by the failing side, if any.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl Retryable for ProviderError {
    fn is_retryable(&self) -> bool {
        ProviderError::is_retryable(self)
    }

    fn retry_after(&self) -> Option<Duration> {
        ProviderError::retry_after(self)
    }
}

/// Retry schedule: `max_retries + 1` attempts in total, waiting
/// `base_delay * backoff_factor^n` (capped at `max_delay`) before retry `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub backoff_factor: f64,
    pub max_delay: Duration,
}

impl From<&ProviderConfig> for RetryPolicy {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: config.base_delay,
            backoff_factor: config.backoff_factor,
            max_delay: config.max_delay,
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `retry` (0 for the first retry).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.backoff_factor.max(1.0).powi(retry.min(i32::MAX as u32) as i32);
        let secs = self.base_delay.as_secs_f64() * factor;
        if !secs.is_finite() || secs >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }
        Duration::from_secs_f64(secs)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// the attempts are exhausted. The last error is returned unchanged.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        E: Retryable + std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut retry = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() || retry >= self.max_retries => return Err(err),
                Err(err) => {
                    let mut delay = self.delay_for(retry);
                    if let Some(hint) = err.retry_after() {
                        delay = delay.max(hint).min(self.max_delay);
                    }
                    events::retry_scheduled(retry + 1, self.max_retries, delay, &err.to_string());
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
            }
        }
    }
}
