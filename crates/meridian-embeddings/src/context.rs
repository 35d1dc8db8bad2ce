//! Shared resilience state: breakers and the vector cache.
//!
//! Built once from config and shared by `Arc` across engines. Nothing here
//! is global; tests build a fresh context or call [`ResilienceContext::reset`].

use meridian_core::MeridianConfig;
use serde::Serialize;

use crate::breaker::{BreakerRegistry, BreakerSnapshot};
use crate::cache::VectorCache;

#[derive(Debug)]
pub struct ResilienceContext {
    breakers: BreakerRegistry,
    cache: VectorCache,
}

/// Health summary returned by [`ResilienceContext::health`].
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub breakers: Vec<BreakerSnapshot>,
    pub cached_vectors: u64,
}

impl ResilienceContext {
    pub fn new(config: &MeridianConfig) -> Self {
        Self {
            breakers: BreakerRegistry::new(&config.breaker),
            cache: VectorCache::new(config.cache.max_entries),
        }
    }

    pub fn breakers(&self) -> &BreakerRegistry {
        &self.breakers
    }

    pub fn cache(&self) -> &VectorCache {
        &self.cache
    }

    /// Close every breaker and empty the cache.
    pub fn reset(&self) {
        self.breakers.reset_all();
        self.cache.clear();
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            breakers: self.breakers.snapshots(),
            cached_vectors: self.cache.len(),
        }
    }
}
