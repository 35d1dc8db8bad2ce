//! Provider clients and the per-identity registry.
//!
//! - `remote`: hosted OpenAI-compatible API
//! - `local`: local inference server

mod http;
pub mod local_provider;
pub mod remote_provider;

pub use local_provider::LocalProvider;
pub use remote_provider::RemoteProvider;

use std::sync::Arc;

use meridian_core::{EmbeddingProvider, ProviderId};

/// One client per provider identity.
#[derive(Clone)]
pub struct ProviderSet {
    remote: Arc<dyn EmbeddingProvider>,
    local: Arc<dyn EmbeddingProvider>,
}

impl ProviderSet {
    pub fn new(remote: Arc<dyn EmbeddingProvider>, local: Arc<dyn EmbeddingProvider>) -> Self {
        Self { remote, local }
    }

    /// HTTP clients for both providers sharing one connection pool.
    pub fn http() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            remote: Arc::new(RemoteProvider::new(client.clone())),
            local: Arc::new(LocalProvider::new(client)),
        }
    }

    /// Replace the client registered under `provider.id()`.
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        match provider.id() {
            ProviderId::Remote => self.remote = provider,
            ProviderId::Local => self.local = provider,
        }
        self
    }

    pub fn get(&self, id: ProviderId) -> &Arc<dyn EmbeddingProvider> {
        match id {
            ProviderId::Remote => &self.remote,
            ProviderId::Local => &self.local,
        }
    }
}

impl std::fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSet")
            .field("remote", &self.remote.id())
            .field("local", &self.local.id())
            .finish()
    }
}
