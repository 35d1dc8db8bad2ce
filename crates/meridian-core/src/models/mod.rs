//! Shared data model: vectors, provider identities, per-request config,
//! batch results, and failover events.

pub mod batch_result;
pub mod failover_event;
pub mod provider_id;
pub mod request;

pub use batch_result::{BatchItemError, BatchResult};
pub use failover_event::FailoverEvent;
pub use provider_id::ProviderId;
pub use request::{EmbedOptions, ProviderConfig, RequestPlan};

/// An ordered, fixed-length embedding. Length is set by the provider's model.
pub type EmbeddingVector = Vec<f32>;
