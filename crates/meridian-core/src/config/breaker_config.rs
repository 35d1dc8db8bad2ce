use serde::{Deserialize, Serialize};

use super::defaults;

/// Circuit breaker thresholds, shared by every provider's breaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerConfig {
    /// Consecutive failures that open the circuit.
    pub failure_threshold: u32,
    /// Time an open circuit waits after the last failure before allowing a trial call (milliseconds).
    pub reset_timeout_ms: u64,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: defaults::DEFAULT_FAILURE_THRESHOLD,
            reset_timeout_ms: defaults::DEFAULT_RESET_TIMEOUT_MS,
        }
    }
}
