//! Hosted, OpenAI-compatible embedding API.
//!
//! `POST {api_url}` with `{"model": .., "input": [text]}` and a bearer token;
//! the reply carries `data[0].embedding`.

use async_trait::async_trait;
use meridian_core::{EmbeddingProvider, EmbeddingVector, ProviderConfig, ProviderError, ProviderId};
use serde::{Deserialize, Serialize};

use super::http;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

/// Client for the remote embedding API.
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    client: reqwest::Client,
}

impl RemoteProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmbeddingProvider for RemoteProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Remote
    }

    async fn generate(
        &self,
        text: &str,
        config: &ProviderConfig,
    ) -> Result<EmbeddingVector, ProviderError> {
        let request = EmbedRequest {
            model: &config.model,
            input: [text],
        };
        let response: EmbedResponse =
            http::post_json(&self.client, self.id(), config, &request).await?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| http::malformed(self.id(), "response contained no data".to_string()))?;

        http::validate_vector(self.id(), embedding, config.dimensions)
    }
}
