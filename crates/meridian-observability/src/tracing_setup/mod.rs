//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use meridian_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber with structured JSON output.
///
/// Respects the `MERIDIAN_LOG` environment variable for filtering, falling
/// back to `config.log_level`. Returns `false` if a global subscriber was
/// already installed by the host application.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env("MERIDIAN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init()
        .is_ok()
}

/// Install the global subscriber with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    let filter = EnvFilter::new(filter);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
