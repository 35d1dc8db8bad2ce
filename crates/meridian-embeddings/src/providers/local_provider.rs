//! Local inference service.
//!
//! `POST {api_url}` with `{"texts": [text]}`; the reply is
//! `{"embeddings": [[..]]}` holding L2-normalized sentence embeddings.

use async_trait::async_trait;
use meridian_core::{EmbeddingProvider, EmbeddingVector, ProviderConfig, ProviderError, ProviderId};
use serde::{Deserialize, Serialize};

use super::http;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    texts: [&'a str; 1],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Client for the local embedding server.
#[derive(Debug, Clone)]
pub struct LocalProvider {
    client: reqwest::Client,
}

impl LocalProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmbeddingProvider for LocalProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Local
    }

    async fn generate(
        &self,
        text: &str,
        config: &ProviderConfig,
    ) -> Result<EmbeddingVector, ProviderError> {
        let request = EmbedRequest { texts: [text] };
        let response: EmbedResponse =
            http::post_json(&self.client, self.id(), config, &request).await?;

        let embedding = response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| http::malformed(self.id(), "response contained no embeddings".to_string()))?;

        http::validate_vector(self.id(), embedding, config.dimensions)
    }
}
