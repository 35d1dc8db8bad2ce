//! # meridian-observability
//!
//! Structured tracing setup with span macros and named log events, plus
//! in-process metrics for the embedding engine (cache hit rate, provider
//! usage, failovers, breaker rejections, latency).

pub mod metrics;
pub mod tracing_setup;

pub use metrics::EmbeddingMetrics;
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
