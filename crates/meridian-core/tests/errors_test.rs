use std::time::Duration;

use meridian_core::errors::*;
use meridian_core::ProviderId;

#[test]
fn authentication_is_not_retryable() {
    let err = ProviderError::Authentication {
        provider: ProviderId::Remote,
        status: 401,
        message: "invalid api key".into(),
    };
    assert!(!err.is_retryable());
    assert!(err.is_authentication());
    assert_eq!(err.provider(), ProviderId::Remote);
}

#[test]
fn transient_failures_are_retryable() {
    let transient = [
        ProviderError::Timeout {
            provider: ProviderId::Local,
            timeout_ms: 10_000,
        },
        ProviderError::RateLimited {
            provider: ProviderId::Remote,
            retry_after: None,
        },
        ProviderError::Server {
            provider: ProviderId::Remote,
            status: 503,
            message: "overloaded".into(),
        },
        ProviderError::Network {
            provider: ProviderId::Local,
            reason: "connection refused".into(),
        },
    ];
    for err in transient {
        assert!(err.is_retryable(), "{err} should be retryable");
        assert!(!err.is_authentication());
    }
}

#[test]
fn client_rejection_is_not_retryable() {
    let err = ProviderError::Rejected {
        provider: ProviderId::Remote,
        status: 400,
        message: "input too long".into(),
    };
    assert!(!err.is_retryable());
    assert!(!err.is_authentication());
}

#[test]
fn dimension_mismatch_is_not_retryable() {
    let err = ProviderError::DimensionMismatch {
        provider: ProviderId::Remote,
        expected: 1536,
        actual: 3072,
    };
    assert!(!err.is_retryable());
    assert_eq!(err.provider(), ProviderId::Remote);
    assert_eq!(err.to_string(), "remote: expected 1536 dimensions, got 3072");
}

#[test]
fn rate_limit_carries_retry_after() {
    let err = ProviderError::RateLimited {
        provider: ProviderId::Remote,
        retry_after: Some(Duration::from_secs(3)),
    };
    assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
}

#[test]
fn provider_error_converts_to_embed_error() {
    let err: EmbedError = ProviderError::Timeout {
        provider: ProviderId::Remote,
        timeout_ms: 50,
    }
    .into();
    assert!(matches!(err, EmbedError::Provider(_)));
    assert!(err.to_string().contains("timed out"));
}

#[test]
fn failover_error_names_both_causes() {
    let err = EmbedError::FailoverExhausted {
        primary_provider: ProviderId::Remote,
        primary: Box::new(EmbedError::CircuitOpen {
            provider: ProviderId::Remote,
        }),
        fallback_provider: ProviderId::Local,
        fallback: Box::new(
            ProviderError::Server {
                provider: ProviderId::Local,
                status: 500,
                message: "boom".into(),
            }
            .into(),
        ),
    };
    let msg = err.to_string();
    assert!(msg.contains("circuit open for provider remote"));
    assert!(msg.contains("HTTP 500"));
    assert!(!err.is_authentication());
}

#[test]
fn nested_authentication_is_detected() {
    let err = EmbedError::FailoverExhausted {
        primary_provider: ProviderId::Remote,
        primary: Box::new(EmbedError::CircuitOpen {
            provider: ProviderId::Remote,
        }),
        fallback_provider: ProviderId::Local,
        fallback: Box::new(
            ProviderError::Authentication {
                provider: ProviderId::Local,
                status: 403,
                message: "forbidden".into(),
            }
            .into(),
        ),
    };
    assert!(err.is_authentication());
}

#[test]
fn validation_error_names_vector_and_index() {
    let err = ValidationError::NonFiniteValue {
        which: VectorSide::Right,
        index: 7,
    };
    let msg = err.to_string();
    assert!(msg.contains("right"));
    assert!(msg.contains('7'));
}
