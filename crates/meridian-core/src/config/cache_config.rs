use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum cached vectors before the least valuable entries are evicted.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}
