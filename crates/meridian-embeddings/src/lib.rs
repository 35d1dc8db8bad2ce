//! # meridian-embeddings
//!
//! Resilient embedding dispatch over a hosted API and a local inference
//! service, with per-provider circuit breakers, bounded retry, failover,
//! a shared vector cache, and paced batching.
//!
//! ## Architecture
//!
//! ```text
//! Embedder
//! ├── RequestPlan (config + per-request overrides)
//! ├── ResilienceContext (Arc-shared)
//! │   ├── BreakerRegistry (one CircuitBreaker per ProviderId)
//! │   └── VectorCache (moka, blake3 keys)
//! ├── RetryPolicy (exponential backoff, Retry-After aware)
//! ├── ProviderSet
//! │   ├── RemoteProvider (OpenAI-compatible)
//! │   └── LocalProvider (local inference server)
//! └── embed_batch (chunked, concurrent within a chunk, paced)
//! ```

pub mod batch;
pub mod breaker;
pub mod cache;
pub mod context;
pub mod engine;
pub mod providers;
pub mod retry;
pub mod similarity;

pub use breaker::{BreakerRegistry, BreakerSnapshot, CallPermit, CircuitBreaker, CircuitStatus};
pub use cache::VectorCache;
pub use context::{HealthReport, ResilienceContext};
pub use engine::Embedder;
pub use providers::{LocalProvider, ProviderSet, RemoteProvider};
pub use retry::{RetryPolicy, Retryable};
pub use similarity::cosine_similarity;
