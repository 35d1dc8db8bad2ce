use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::ProviderId;

/// Connection settings for one provider backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderProfile {
    /// Model name sent to the backend and used in cache keys.
    pub model: String,
    /// Full endpoint URL.
    pub api_url: String,
    /// Bearer credential, if the backend needs one.
    pub api_key: Option<String>,
    /// Per-attempt timeout (milliseconds).
    pub timeout_ms: u64,
    /// Expected vector dimensions. Responses of any other length are rejected.
    pub dimensions: Option<usize>,
}

impl ProviderProfile {
    pub fn remote_defaults() -> Self {
        Self {
            model: defaults::DEFAULT_REMOTE_MODEL.to_string(),
            api_url: defaults::DEFAULT_REMOTE_API_URL.to_string(),
            api_key: None,
            timeout_ms: defaults::DEFAULT_TIMEOUT_MS,
            dimensions: Some(defaults::DEFAULT_REMOTE_DIMENSIONS),
        }
    }

    pub fn local_defaults() -> Self {
        Self {
            model: defaults::DEFAULT_LOCAL_MODEL.to_string(),
            api_url: defaults::DEFAULT_LOCAL_API_URL.to_string(),
            api_key: None,
            timeout_ms: defaults::DEFAULT_TIMEOUT_MS,
            dimensions: Some(defaults::DEFAULT_LOCAL_DIMENSIONS),
        }
    }

    fn apply(&mut self, overrides: ProfileOverrides) {
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
        if overrides.api_key.is_some() {
            self.api_key = overrides.api_key;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if overrides.dimensions.is_some() {
            self.dimensions = overrides.dimensions;
        }
    }
}

/// Per-provider profiles, one table per `ProviderId`.
///
/// Each table is partial: keys it omits keep that provider's own defaults,
/// so `[providers.local]` with only `api_url` still gets the local model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProvidersConfig")]
pub struct ProvidersConfig {
    pub remote: ProviderProfile,
    pub local: ProviderProfile,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            remote: ProviderProfile::remote_defaults(),
            local: ProviderProfile::local_defaults(),
        }
    }
}

impl ProvidersConfig {
    pub fn profile(&self, id: ProviderId) -> &ProviderProfile {
        match id {
            ProviderId::Remote => &self.remote,
            ProviderId::Local => &self.local,
        }
    }

    pub fn profile_mut(&mut self, id: ProviderId) -> &mut ProviderProfile {
        match id {
            ProviderId::Remote => &mut self.remote,
            ProviderId::Local => &mut self.local,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileOverrides {
    model: Option<String>,
    api_url: Option<String>,
    api_key: Option<String>,
    timeout_ms: Option<u64>,
    dimensions: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProvidersConfig {
    remote: ProfileOverrides,
    local: ProfileOverrides,
}

impl From<RawProvidersConfig> for ProvidersConfig {
    fn from(raw: RawProvidersConfig) -> Self {
        let mut config = Self::default();
        config.remote.apply(raw.remote);
        config.local.apply(raw.local);
        config
    }
}
