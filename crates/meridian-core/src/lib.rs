//! # meridian-core
//!
//! Foundation crate for the Meridian embedding engine.
//! Defines the shared types, the provider trait, errors, config, and defaults.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MeridianConfig;
pub use errors::{EmbedError, EmbedResult, ProviderError, ValidationError};
pub use models::{
    BatchItemError, BatchResult, EmbedOptions, EmbeddingVector, ProviderConfig, ProviderId,
    RequestPlan,
};
pub use traits::EmbeddingProvider;
