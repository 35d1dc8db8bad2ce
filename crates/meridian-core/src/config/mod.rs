//! Configuration: one struct per subsystem, aggregated by `MeridianConfig`.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`MERIDIAN_*`)
//! 2. TOML config file
//! 3. Compiled defaults (`defaults.rs`)
//!
//! Per-request overrides (`EmbedOptions`) are layered on top at call time.

pub mod batch_config;
pub mod breaker_config;
pub mod cache_config;
pub mod defaults;
pub mod embedding_config;
pub mod observability_config;
pub mod provider_config;

pub use batch_config::BatchConfig;
pub use breaker_config::BreakerConfig;
pub use cache_config::CacheConfig;
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use provider_config::{ProviderProfile, ProvidersConfig};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::ProviderId;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeridianConfig {
    pub embedding: EmbeddingConfig,
    pub providers: ProvidersConfig,
    pub breaker: BreakerConfig,
    pub cache: CacheConfig,
    pub batch: BatchConfig,
    pub observability: ObservabilityConfig,
}

impl MeridianConfig {
    /// Load configuration: defaults, then the optional TOML file, then
    /// `MERIDIAN_*` environment overrides. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let embedding = &self.embedding;
        if !embedding.backoff_factor.is_finite() || embedding.backoff_factor < 1.0 {
            return Err(invalid("embedding.backoff_factor", "must be a finite number >= 1.0"));
        }
        if embedding.max_delay_ms < embedding.base_delay_ms {
            return Err(invalid(
                "embedding.max_delay_ms",
                "must be greater than or equal to base_delay_ms",
            ));
        }
        for id in ProviderId::ALL {
            let profile = self.providers.profile(id);
            if profile.timeout_ms == 0 {
                return Err(invalid(
                    &format!("providers.{id}.timeout_ms"),
                    "must be greater than 0",
                ));
            }
            if profile.api_url.trim().is_empty() {
                return Err(invalid(&format!("providers.{id}.api_url"), "must not be empty"));
            }
            if profile.dimensions == Some(0) {
                return Err(invalid(
                    &format!("providers.{id}.dimensions"),
                    "must be greater than 0",
                ));
            }
        }
        if self.breaker.failure_threshold == 0 {
            return Err(invalid("breaker.failure_threshold", "must be greater than 0"));
        }
        if self.cache.max_entries == 0 {
            return Err(invalid("cache.max_entries", "must be greater than 0"));
        }
        if self.batch.chunk_size == 0 {
            return Err(invalid("batch.chunk_size", "must be greater than 0"));
        }
        Ok(())
    }

    /// Apply `MERIDIAN_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    /// Pattern: `MERIDIAN_PROVIDER`, `MERIDIAN_REMOTE_API_KEY`, `MERIDIAN_BATCH_CHUNK_SIZE`, etc.
    /// Values that fail to parse are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("MERIDIAN_PROVIDER").and_then(|v| v.parse().ok()) {
            self.embedding.provider = id;
        }
        if let Some(val) = lookup("MERIDIAN_FALLBACK_PROVIDER") {
            if val.trim().eq_ignore_ascii_case("none") {
                self.embedding.fallback_provider = None;
            } else if let Ok(id) = val.parse() {
                self.embedding.fallback_provider = Some(id);
            }
        }
        if let Some(v) = lookup("MERIDIAN_MAX_RETRIES").and_then(|v| v.parse().ok()) {
            self.embedding.max_retries = v;
        }
        if let Some(v) = lookup("MERIDIAN_BACKOFF_FACTOR").and_then(|v| v.parse().ok()) {
            self.embedding.backoff_factor = v;
        }

        for id in ProviderId::ALL {
            let prefix = format!("MERIDIAN_{}", id.as_str().to_ascii_uppercase());
            let profile = self.providers.profile_mut(id);
            if let Some(v) = lookup(&format!("{prefix}_MODEL")) {
                profile.model = v;
            }
            if let Some(v) = lookup(&format!("{prefix}_API_URL")) {
                profile.api_url = v;
            }
            if let Some(v) = lookup(&format!("{prefix}_API_KEY")) {
                profile.api_key = Some(v);
            }
            if let Some(v) = lookup(&format!("{prefix}_TIMEOUT_MS")).and_then(|v| v.parse().ok()) {
                profile.timeout_ms = v;
            }
        }
        if self.providers.remote.api_key.is_none() {
            self.providers.remote.api_key = lookup("OPENAI_API_KEY");
        }

        if let Some(v) = lookup("MERIDIAN_BREAKER_FAILURE_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.breaker.failure_threshold = v;
        }
        if let Some(v) = lookup("MERIDIAN_BREAKER_RESET_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.breaker.reset_timeout_ms = v;
        }
        if let Some(v) = lookup("MERIDIAN_CACHE_MAX_ENTRIES").and_then(|v| v.parse().ok()) {
            self.cache.max_entries = v;
        }
        if let Some(v) = lookup("MERIDIAN_BATCH_CHUNK_SIZE").and_then(|v| v.parse().ok()) {
            self.batch.chunk_size = v;
        }
        if let Some(v) = lookup("MERIDIAN_BATCH_PACING_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.batch.pacing_delay_ms = v;
        }
        if let Some(v) = lookup("MERIDIAN_LOG_LEVEL") {
            self.observability.log_level = v;
        }
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
