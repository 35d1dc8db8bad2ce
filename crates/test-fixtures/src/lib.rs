//! Shared test support for the Meridian workspace.
//!
//! Scripted in-process providers, fast engine configurations, canned
//! provider errors, and a loader for the JSON response bodies under `data/`.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use meridian_core::{
    EmbeddingProvider, EmbeddingVector, MeridianConfig, ProviderConfig, ProviderError, ProviderId,
};
use serde::de::DeserializeOwned;

type Script = dyn Fn(usize, &str) -> Result<EmbeddingVector, ProviderError> + Send + Sync;

/// Provider whose every response comes from a closure.
///
/// The closure receives the zero-based call number and the text. Calls are
/// counted and the texts recorded so tests can assert on traffic.
pub struct ScriptedProvider {
    id: ProviderId,
    script: Box<Script>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    texts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new<F>(id: ProviderId, script: F) -> Self
    where
        F: Fn(usize, &str) -> Result<EmbeddingVector, ProviderError> + Send + Sync + 'static,
    {
        Self {
            id,
            script: Box::new(script),
            delay: None,
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Always succeeds with [`vector_for`] the text.
    pub fn healthy(id: ProviderId, dims: usize) -> Self {
        Self::new(id, move |_, text| Ok(vector_for(text, dims)))
    }

    /// Always fails with a clone of `error`.
    pub fn failing(id: ProviderId, error: ProviderError) -> Self {
        Self::new(id, move |_, _| Err(error.clone()))
    }

    /// Sleep this long before answering (tokio time, so pausable).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn generate(
        &self,
        text: &str,
        _config: &ProviderConfig,
    ) -> Result<EmbeddingVector, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(text.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.script)(call, text)
    }
}

/// Deterministic non-zero vector derived from the text bytes.
pub fn vector_for(text: &str, dims: usize) -> EmbeddingVector {
    let seed: u32 = text.bytes().map(u32::from).sum();
    (0..dims as u32)
        .map(|i| ((seed + i * 31) % 97) as f32 / 97.0 + 0.01)
        .collect()
}

/// Config with no retries, millisecond backoff, and no batch pacing.
pub fn fast_config() -> MeridianConfig {
    let mut config = MeridianConfig::default();
    config.embedding.max_retries = 0;
    config.embedding.base_delay_ms = 1;
    config.embedding.max_delay_ms = 10;
    config.batch.pacing_delay_ms = 0;
    config
}

pub fn server_error(provider: ProviderId) -> ProviderError {
    ProviderError::Server {
        provider,
        status: 503,
        message: "service unavailable".to_string(),
    }
}

pub fn auth_error(provider: ProviderId) -> ProviderError {
    ProviderError::Authentication {
        provider,
        status: 401,
        message: "invalid api key".to_string(),
    }
}

/// Absolute path of a file under `data/`.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(relative_path)
}

/// Raw contents of a fixture file.
///
/// # Panics
/// Panics if the file can't be read.
pub fn load_fixture_text(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = load_fixture_text(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {relative_path}: {e}"))
}
