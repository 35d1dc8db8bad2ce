use super::{ConfigError, ProviderError, ValidationError};
use crate::models::{BatchItemError, ProviderId};

/// Errors surfaced by the embedding engine.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmbedError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("circuit open for provider {provider}")]
    CircuitOpen { provider: ProviderId },

    #[error("all providers failed: {primary_provider}: {primary}; {fallback_provider}: {fallback}")]
    FailoverExhausted {
        primary_provider: ProviderId,
        primary: Box<EmbedError>,
        fallback_provider: ProviderId,
        fallback: Box<EmbedError>,
    },

    #[error("batch failed: all {total} texts failed")]
    BatchFailed {
        total: usize,
        errors: Vec<BatchItemError>,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type EmbedResult<T> = Result<T, EmbedError>;

impl EmbedError {
    /// Whether this error, or any failover cause inside it, is a credential failure.
    pub fn is_authentication(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_authentication(),
            Self::FailoverExhausted {
                primary, fallback, ..
            } => primary.is_authentication() || fallback.is_authentication(),
            _ => false,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_circuit_open(&self) -> bool {
        matches!(self, Self::CircuitOpen { .. })
    }
}
