//! Cache hit rate, provider usage and failures, failovers, breaker rejections, latency.

use std::collections::HashMap;
use std::time::Duration;

use meridian_core::ProviderId;
use serde::{Deserialize, Serialize};

/// Samples kept for latency percentiles; older samples are dropped first.
const MAX_LATENCY_SAMPLES: usize = 10_000;

/// Embedding engine metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingMetrics {
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Successful provider calls per provider.
    pub provider_successes: HashMap<ProviderId, u64>,
    /// Failed provider calls (after retries) per provider.
    pub provider_failures: HashMap<ProviderId, u64>,
    /// Requests refused by an open circuit, per provider.
    pub breaker_rejections: HashMap<ProviderId, u64>,
    /// Requests served by a fallback provider.
    pub failovers: u64,
    /// Provider call latency samples in microseconds.
    latency_samples_us: Vec<u64>,
}

impl EmbeddingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache lookup result.
    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.cache_hits += 1;
        } else {
            self.cache_misses += 1;
        }
    }

    /// Record the outcome of one provider call (retries included) and its latency.
    pub fn record_call(&mut self, provider: ProviderId, success: bool, duration: Duration) {
        let counter = if success {
            &mut self.provider_successes
        } else {
            &mut self.provider_failures
        };
        *counter.entry(provider).or_default() += 1;

        self.latency_samples_us.push(duration.as_micros() as u64);
        if self.latency_samples_us.len() > MAX_LATENCY_SAMPLES {
            self.latency_samples_us
                .drain(..self.latency_samples_us.len() - MAX_LATENCY_SAMPLES);
        }
    }

    pub fn record_breaker_rejection(&mut self, provider: ProviderId) {
        *self.breaker_rejections.entry(provider).or_default() += 1;
    }

    pub fn record_failover(&mut self) {
        self.failovers += 1;
    }

    /// Fraction of lookups served from cache.
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    /// Total provider calls, successful or not.
    pub fn provider_calls(&self, provider: ProviderId) -> u64 {
        self.provider_successes.get(&provider).copied().unwrap_or(0)
            + self.provider_failures.get(&provider).copied().unwrap_or(0)
    }

    /// Provider latency at the given percentile (0.0–1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.latency_samples_us.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted = self.latency_samples_us.clone();
        sorted.sort_unstable();
        let idx = ((p * (sorted.len() - 1) as f64).round() as usize).min(sorted.len() - 1);
        Duration::from_micros(sorted[idx])
    }
}
