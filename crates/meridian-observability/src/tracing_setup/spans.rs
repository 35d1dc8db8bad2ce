//! Span definitions per operation: single embed and batch embed.

/// Create a span around one embedding request.
#[macro_export]
macro_rules! embed_span {
    ($provider:expr, $model:expr) => {
        tracing::info_span!("meridian.embed", provider = %$provider, model = %$model)
    };
}

/// Create a span around a batch request.
#[macro_export]
macro_rules! batch_span {
    ($size:expr, $chunks:expr) => {
        tracing::info_span!("meridian.batch", size = $size, chunks = $chunks)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const EMBED: &str = "meridian.embed";
    pub const BATCH: &str = "meridian.batch";
}
