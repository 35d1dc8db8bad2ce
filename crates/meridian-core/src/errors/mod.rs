//! Error handling for Meridian.
//! One error enum per concern, `thiserror` only, aggregated by `EmbedError`.

pub mod config_error;
pub mod embed_error;
pub mod provider_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use embed_error::{EmbedError, EmbedResult};
pub use provider_error::ProviderError;
pub use validation_error::{ValidationError, VectorSide};
