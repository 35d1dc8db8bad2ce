use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Identity of a configured embedding backend.
///
/// Closed set: adding a backend means adding a variant here, and every
/// exhaustive match over providers (breakers, provider registry, config
/// profiles) fails to compile until it is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Hosted, OpenAI-compatible embedding API.
    Remote,
    /// Local inference service.
    Local,
}

impl ProviderId {
    /// Every known provider, in default priority order.
    pub const ALL: [ProviderId; 2] = [ProviderId::Remote, ProviderId::Local];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            _ => Err(ValidationError::UnknownProvider {
                name: s.to_string(),
            }),
        }
    }
}
