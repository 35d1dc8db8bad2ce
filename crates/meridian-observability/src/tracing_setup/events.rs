//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

use std::time::Duration;

use meridian_core::ProviderId;

/// Log a request served by the fallback provider.
pub fn provider_failover(primary: ProviderId, fallback: ProviderId, reason: &str) {
    tracing::warn!(
        event = "provider_failover",
        primary = %primary,
        fallback = %fallback,
        reason = %reason,
        "primary provider unavailable, served by fallback"
    );
}

/// Log a circuit breaker state change.
pub fn breaker_transition(provider: ProviderId, from: &str, to: &str, failure_count: u32) {
    tracing::info!(
        event = "breaker_transition",
        provider = %provider,
        from = %from,
        to = %to,
        failure_count = failure_count,
        "circuit breaker transition"
    );
}

/// Log a retry about to happen after a transient failure.
pub fn retry_scheduled(attempt: u32, max_retries: u32, delay: Duration, error: &str) {
    tracing::debug!(
        event = "retry_scheduled",
        attempt = attempt,
        max_retries = max_retries,
        delay_ms = delay.as_millis() as u64,
        error = %error,
        "retrying after transient failure"
    );
}

/// Log completion of one batch chunk.
pub fn batch_chunk_completed(chunk: usize, chunks: usize, succeeded: usize, failed: usize) {
    tracing::info!(
        event = "batch_chunk_completed",
        chunk = chunk,
        chunks = chunks,
        succeeded = succeeded,
        failed = failed,
        "batch chunk settled"
    );
}
