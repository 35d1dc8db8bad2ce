use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::models::{EmbeddingVector, ProviderConfig, ProviderId};

/// Embedding generation backend.
///
/// Implementations build the request, parse the response, and map every
/// failure to a typed `ProviderError`. They never retry or fall back.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Which configured backend this is.
    fn id(&self) -> ProviderId;

    /// Embed a single text using the resolved per-request configuration.
    async fn generate(
        &self,
        text: &str,
        config: &ProviderConfig,
    ) -> Result<EmbeddingVector, ProviderError>;
}
