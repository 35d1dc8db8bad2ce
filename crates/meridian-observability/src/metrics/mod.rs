//! In-process metrics collected by the embedding engine.

pub mod embedding_metrics;

pub use embedding_metrics::EmbeddingMetrics;
