use std::time::Duration;

use meridian_core::config::ObservabilityConfig;
use meridian_core::ProviderId;
use meridian_observability::tracing_setup::{events, spans};
use meridian_observability::{init_tracing, EmbeddingMetrics};

#[test]
fn empty_metrics_report_zero_rates() {
    let metrics = EmbeddingMetrics::new();
    assert_eq!(metrics.cache_hit_rate(), 0.0);
    assert_eq!(metrics.latency_percentile(0.5), Duration::ZERO);
    assert_eq!(metrics.provider_calls(ProviderId::Remote), 0);
}

#[test]
fn cache_hit_rate_counts_hits_over_lookups() {
    let mut metrics = EmbeddingMetrics::new();
    metrics.record_lookup(true);
    metrics.record_lookup(false);
    metrics.record_lookup(true);
    metrics.record_lookup(true);
    assert_eq!(metrics.cache_hit_rate(), 0.75);
}

#[test]
fn provider_calls_split_by_outcome() {
    let mut metrics = EmbeddingMetrics::new();
    metrics.record_call(ProviderId::Remote, true, Duration::from_millis(10));
    metrics.record_call(ProviderId::Remote, false, Duration::from_millis(30));
    metrics.record_call(ProviderId::Local, true, Duration::from_millis(20));

    assert_eq!(metrics.provider_calls(ProviderId::Remote), 2);
    assert_eq!(metrics.provider_calls(ProviderId::Local), 1);
    assert_eq!(metrics.provider_failures.get(&ProviderId::Remote), Some(&1));
    assert_eq!(metrics.latency_percentile(0.0), Duration::from_millis(10));
    assert_eq!(metrics.latency_percentile(0.5), Duration::from_millis(20));
    assert_eq!(metrics.latency_percentile(1.0), Duration::from_millis(30));
}

#[test]
fn latency_samples_are_bounded() {
    let mut metrics = EmbeddingMetrics::new();
    for i in 0..10_500u64 {
        metrics.record_call(ProviderId::Local, true, Duration::from_micros(i));
    }
    // The 500 oldest (smallest) samples were dropped.
    assert_eq!(metrics.latency_percentile(0.0), Duration::from_micros(500));
}

#[test]
fn metrics_serialize_with_provider_keys() {
    let mut metrics = EmbeddingMetrics::new();
    metrics.record_breaker_rejection(ProviderId::Remote);
    metrics.record_failover();
    let json = serde_json::to_value(&metrics).unwrap();
    assert_eq!(json["breaker_rejections"]["remote"], 1);
    assert_eq!(json["failovers"], 1);
}

#[test]
fn second_init_reports_existing_subscriber() {
    let config = ObservabilityConfig::default();
    // Only one global subscriber can be installed per process.
    let first = init_tracing(&config);
    let second = init_tracing(&config);
    assert!(!second);
    let _ = first;

    // Events and spans must be callable with a subscriber installed.
    events::provider_failover(ProviderId::Remote, ProviderId::Local, "circuit open");
    events::batch_chunk_completed(1, 3, 20, 0);
    let span = meridian_observability::embed_span!(ProviderId::Local, "all-MiniLM-L6-v2");
    let _guard = span.enter();
    assert_eq!(spans::names::EMBED, "meridian.embed");
}
