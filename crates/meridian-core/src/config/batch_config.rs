use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Texts dispatched concurrently per chunk.
    pub chunk_size: usize,
    /// Pause between consecutive chunks (milliseconds).
    pub pacing_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::DEFAULT_BATCH_CHUNK_SIZE,
            pacing_delay_ms: defaults::DEFAULT_BATCH_PACING_DELAY_MS,
        }
    }
}
