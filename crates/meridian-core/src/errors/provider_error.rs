use std::time::Duration;

use crate::models::ProviderId;

/// Failures raised by provider clients.
///
/// Providers only classify; retry and failover decisions are made by the
/// engine from `is_retryable` and `is_authentication`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider}: authentication failed (HTTP {status}): {message}")]
    Authentication {
        provider: ProviderId,
        status: u16,
        message: String,
    },

    #[error("{provider}: rate limited (retry after {retry_after:?})")]
    RateLimited {
        provider: ProviderId,
        retry_after: Option<Duration>,
    },

    #[error("{provider}: request timed out after {timeout_ms}ms")]
    Timeout { provider: ProviderId, timeout_ms: u64 },

    #[error("{provider}: server error (HTTP {status}): {message}")]
    Server {
        provider: ProviderId,
        status: u16,
        message: String,
    },

    #[error("{provider}: network error: {reason}")]
    Network { provider: ProviderId, reason: String },

    #[error("{provider}: request rejected (HTTP {status}): {message}")]
    Rejected {
        provider: ProviderId,
        status: u16,
        message: String,
    },

    #[error("{provider}: malformed response: {reason}")]
    MalformedResponse { provider: ProviderId, reason: String },

    #[error("{provider}: expected {expected} dimensions, got {actual}")]
    DimensionMismatch {
        provider: ProviderId,
        expected: usize,
        actual: usize,
    },
}

impl ProviderError {
    /// The provider that raised this error.
    pub fn provider(&self) -> ProviderId {
        match self {
            Self::Authentication { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::Server { provider, .. }
            | Self::Network { provider, .. }
            | Self::Rejected { provider, .. }
            | Self::MalformedResponse { provider, .. }
            | Self::DimensionMismatch { provider, .. } => *provider,
        }
    }

    /// Whether another attempt against the same provider may succeed.
    ///
    /// Credential failures, client-side rejections and wrongly sized vectors
    /// repeat on every attempt. Timeouts, rate limits, 5xx, transport errors
    /// and garbled payloads are treated as transient.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::Authentication { .. } | Self::Rejected { .. } | Self::DimensionMismatch { .. }
        )
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Server-provided hint for when to retry, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
