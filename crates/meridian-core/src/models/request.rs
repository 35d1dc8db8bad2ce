use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ProviderId;
use crate::config::MeridianConfig;
use crate::errors::ValidationError;

/// Caller overrides for a single request. Unset fields fall back to config.
///
/// `model`, `api_key`, `api_url` and `timeout_ms` apply to the primary
/// provider only; the fallback always uses its configured profile. The
/// configured `dimensions` belong to the configured model, so overriding
/// `model` drops the size check unless `dimensions` is also given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbedOptions {
    pub provider: Option<ProviderId>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub dimensions: Option<usize>,
    pub max_retries: Option<u32>,
    pub backoff_factor: Option<f64>,
    pub fallback_provider: Option<ProviderId>,
}

impl EmbedOptions {
    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_fallback(mut self, provider: ProviderId) -> Self {
        self.fallback_provider = Some(provider);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }
}

/// Immutable, fully resolved configuration for calling one provider.
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    pub id: ProviderId,
    pub model: String,
    pub api_url: String,
    pub api_key: Option<String>,
    /// Bound on a single attempt.
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff_factor: f64,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Provider to try when this one is unavailable or exhausted.
    pub fallback: Option<ProviderId>,
    /// Expected vector length, if known.
    pub dimensions: Option<usize>,
}

// Manual impl keeps credentials out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("id", &self.id)
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff_factor", &self.backoff_factor)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .field("fallback", &self.fallback)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

impl ProviderConfig {
    /// Build the configuration for `id` from its configured profile.
    pub fn from_config(config: &MeridianConfig, id: ProviderId) -> Self {
        let profile = config.providers.profile(id);
        let embedding = &config.embedding;
        Self {
            id,
            model: profile.model.clone(),
            api_url: profile.api_url.clone(),
            api_key: profile.api_key.clone(),
            timeout: Duration::from_millis(profile.timeout_ms),
            max_retries: embedding.max_retries,
            backoff_factor: embedding.backoff_factor,
            base_delay: Duration::from_millis(embedding.base_delay_ms),
            max_delay: Duration::from_millis(embedding.max_delay_ms),
            fallback: None,
            dimensions: profile.dimensions,
        }
    }
}

/// Which providers a request will use, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPlan {
    pub primary: ProviderConfig,
    pub fallback: Option<ProviderConfig>,
}

impl RequestPlan {
    /// Merge configured defaults with caller overrides.
    ///
    /// A fallback equal to the primary is dropped.
    pub fn resolve(config: &MeridianConfig, options: &EmbedOptions) -> Result<Self, ValidationError> {
        validate_options(options)?;

        let primary_id = options.provider.unwrap_or(config.embedding.provider);
        let fallback_id = options
            .fallback_provider
            .or(config.embedding.fallback_provider)
            .filter(|id| *id != primary_id);

        let max_retries = options.max_retries.unwrap_or(config.embedding.max_retries);
        let backoff_factor = options
            .backoff_factor
            .unwrap_or(config.embedding.backoff_factor);

        let mut primary = ProviderConfig::from_config(config, primary_id);
        primary.max_retries = max_retries;
        primary.backoff_factor = backoff_factor;
        primary.fallback = fallback_id;
        if let Some(ref model) = options.model {
            if *model != primary.model {
                primary.dimensions = None;
            }
            primary.model = model.clone();
        }
        if options.dimensions.is_some() {
            primary.dimensions = options.dimensions;
        }
        if let Some(ref api_url) = options.api_url {
            primary.api_url = api_url.clone();
        }
        if options.api_key.is_some() {
            primary.api_key = options.api_key.clone();
        }
        if let Some(timeout_ms) = options.timeout_ms {
            primary.timeout = Duration::from_millis(timeout_ms);
        }

        let fallback = fallback_id.map(|id| {
            let mut fallback = ProviderConfig::from_config(config, id);
            fallback.max_retries = max_retries;
            fallback.backoff_factor = backoff_factor;
            fallback
        });

        Ok(Self { primary, fallback })
    }
}

fn validate_options(options: &EmbedOptions) -> Result<(), ValidationError> {
    if options.timeout_ms == Some(0) {
        return Err(invalid_option("timeoutMs", "must be greater than 0"));
    }
    if let Some(factor) = options.backoff_factor {
        if !factor.is_finite() || factor < 1.0 {
            return Err(invalid_option("backoffFactor", "must be a finite number >= 1.0"));
        }
    }
    if options.dimensions == Some(0) {
        return Err(invalid_option("dimensions", "must be greater than 0"));
    }
    if options.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
        return Err(invalid_option("model", "must not be empty"));
    }
    if options.api_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
        return Err(invalid_option("apiUrl", "must not be empty"));
    }
    Ok(())
}

fn invalid_option(option: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidOption {
        option: option.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_route_remote_then_local() {
        let plan = RequestPlan::resolve(&MeridianConfig::default(), &EmbedOptions::default()).unwrap();
        assert_eq!(plan.primary.id, ProviderId::Remote);
        assert_eq!(plan.primary.fallback, Some(ProviderId::Local));
        assert_eq!(plan.primary.timeout, Duration::from_millis(10_000));
        assert_eq!(plan.primary.max_retries, 3);
        assert_eq!(plan.primary.backoff_factor, 2.0);
        let fallback = plan.fallback.unwrap();
        assert_eq!(fallback.id, ProviderId::Local);
        assert_eq!(fallback.model, "all-MiniLM-L6-v2");
    }

    #[test]
    fn overrides_apply_to_primary_only() {
        let options = EmbedOptions {
            model: Some("text-embedding-3-large".into()),
            api_key: Some("sk-test".into()),
            timeout_ms: Some(500),
            max_retries: Some(1),
            ..Default::default()
        };
        let plan = RequestPlan::resolve(&MeridianConfig::default(), &options).unwrap();
        assert_eq!(plan.primary.model, "text-embedding-3-large");
        assert_eq!(plan.primary.api_key.as_deref(), Some("sk-test"));
        assert_eq!(plan.primary.timeout, Duration::from_millis(500));

        let fallback = plan.fallback.unwrap();
        assert_eq!(fallback.model, "all-MiniLM-L6-v2");
        assert_eq!(fallback.api_key, None);
        assert_eq!(fallback.timeout, Duration::from_millis(10_000));
        // Retry policy is shared by both tiers.
        assert_eq!(fallback.max_retries, 1);
    }

    #[test]
    fn model_override_drops_configured_dimensions() {
        let config = MeridianConfig::default();
        let default_plan = RequestPlan::resolve(&config, &EmbedOptions::default()).unwrap();
        assert_eq!(default_plan.primary.dimensions, Some(1536));

        let large = EmbedOptions::default().with_model("text-embedding-3-large");
        let plan = RequestPlan::resolve(&config, &large).unwrap();
        assert_eq!(plan.primary.dimensions, None);
        assert_eq!(plan.fallback.unwrap().dimensions, Some(384));

        let pinned = large.with_dimensions(3072);
        let plan = RequestPlan::resolve(&config, &pinned).unwrap();
        assert_eq!(plan.primary.dimensions, Some(3072));

        let same_model = EmbedOptions::default().with_model("text-embedding-3-small");
        let plan = RequestPlan::resolve(&config, &same_model).unwrap();
        assert_eq!(plan.primary.dimensions, Some(1536));

        let zero = EmbedOptions::default().with_dimensions(0);
        assert!(RequestPlan::resolve(&config, &zero).is_err());
    }

    #[test]
    fn fallback_equal_to_primary_is_dropped() {
        let options = EmbedOptions::default()
            .with_provider(ProviderId::Local)
            .with_fallback(ProviderId::Local);
        let plan = RequestPlan::resolve(&MeridianConfig::default(), &options).unwrap();
        assert_eq!(plan.primary.id, ProviderId::Local);
        assert!(plan.fallback.is_none());
        assert!(plan.primary.fallback.is_none());
    }

    #[test]
    fn rejects_bad_overrides() {
        let config = MeridianConfig::default();
        let zero_timeout = EmbedOptions {
            timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            RequestPlan::resolve(&config, &zero_timeout),
            Err(ValidationError::InvalidOption { .. })
        ));

        let shrinking_backoff = EmbedOptions {
            backoff_factor: Some(0.5),
            ..Default::default()
        };
        assert!(RequestPlan::resolve(&config, &shrinking_backoff).is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let options = EmbedOptions {
            api_key: Some("sk-secret".into()),
            ..Default::default()
        };
        let plan = RequestPlan::resolve(&MeridianConfig::default(), &options).unwrap();
        let rendered = format!("{:?}", plan.primary);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn options_deserialize_from_camel_case() {
        let options: EmbedOptions = serde_json::from_str(
            r#"{"provider":"local","timeoutMs":2500,"fallbackProvider":"remote","backoffFactor":3}"#,
        )
        .unwrap();
        assert_eq!(options.provider, Some(ProviderId::Local));
        assert_eq!(options.timeout_ms, Some(2500));
        assert_eq!(options.fallback_provider, Some(ProviderId::Remote));
        assert_eq!(options.backoff_factor, Some(3.0));
    }
}
