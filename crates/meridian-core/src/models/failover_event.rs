use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProviderId;

/// Recorded whenever a request is served by the fallback provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailoverEvent {
    pub primary: ProviderId,
    pub fallback: ProviderId,
    /// Why the primary could not serve the request.
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}
