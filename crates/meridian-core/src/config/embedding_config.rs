use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::ProviderId;

/// Request routing and retry defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Primary provider for requests that don't name one.
    pub provider: ProviderId,
    /// Secondary provider used when the primary is unavailable or exhausted.
    pub fallback_provider: Option<ProviderId>,
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_factor: f64,
    /// Delay before the first retry (milliseconds).
    pub base_delay_ms: u64,
    /// Upper bound on any single backoff delay (milliseconds).
    pub max_delay_ms: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: ProviderId::Remote,
            fallback_provider: Some(ProviderId::Local),
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            backoff_factor: defaults::DEFAULT_BACKOFF_FACTOR,
            base_delay_ms: defaults::DEFAULT_BASE_DELAY_MS,
            max_delay_ms: defaults::DEFAULT_MAX_DELAY_MS,
        }
    }
}
