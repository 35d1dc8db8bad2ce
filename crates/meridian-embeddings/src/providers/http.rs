//! Transport shared by the HTTP providers: one POST, status classification,
//! and payload validation. No retries here; the engine owns those.

use std::time::Duration;

use meridian_core::{EmbeddingVector, ProviderConfig, ProviderError, ProviderId};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error bodies longer than this are cut before landing in an error message.
const MAX_ERROR_BODY: usize = 256;

/// POST `body` as JSON to `config.api_url` and decode the JSON reply.
pub(crate) async fn post_json<B, R>(
    client: &reqwest::Client,
    provider: ProviderId,
    config: &ProviderConfig,
    body: &B,
) -> Result<R, ProviderError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let mut request = client
        .post(&config.api_url)
        .timeout(config.timeout)
        .json(body);
    if let Some(ref key) = config.api_key {
        request = request.bearer_auth(key);
    }

    let response = request
        .send()
        .await
        .map_err(|e| transport_error(provider, config, &e))?;

    let status = response.status();
    if !status.is_success() {
        let retry_after = parse_retry_after(response.headers());
        let text = response.text().await.unwrap_or_default();
        let timeout_ms = config.timeout.as_millis() as u64;
        return Err(classify_status(provider, status, retry_after, timeout_ms, &text));
    }

    let text = response
        .text()
        .await
        .map_err(|e| transport_error(provider, config, &e))?;
    serde_json::from_str(&text).map_err(|e| ProviderError::MalformedResponse {
        provider,
        reason: format!("undecodable body: {e}"),
    })
}

/// Map a non-2xx status onto the provider error taxonomy.
/// `timeout_ms` is reported for 408 and 504.
pub(crate) fn classify_status(
    provider: ProviderId,
    status: StatusCode,
    retry_after: Option<Duration>,
    timeout_ms: u64,
    body: &str,
) -> ProviderError {
    let code = status.as_u16();
    let message = truncate(body.trim());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication {
            provider,
            status: code,
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
            provider,
            retry_after,
        },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderError::Timeout {
            provider,
            timeout_ms,
        },
        s if s.is_server_error() => ProviderError::Server {
            provider,
            status: code,
            message,
        },
        _ => ProviderError::Rejected {
            provider,
            status: code,
            message,
        },
    }
}

/// `Retry-After` in delta-seconds. HTTP-date values are ignored.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Reject empty, non-finite, or wrongly sized vectors.
pub(crate) fn validate_vector(
    provider: ProviderId,
    vector: EmbeddingVector,
    expected_dimensions: Option<usize>,
) -> Result<EmbeddingVector, ProviderError> {
    if vector.is_empty() {
        return Err(malformed(provider, "empty embedding".to_string()));
    }
    if let Some(index) = vector.iter().position(|v| !v.is_finite()) {
        return Err(malformed(provider, format!("non-finite value at index {index}")));
    }
    if let Some(expected) = expected_dimensions {
        if vector.len() != expected {
            return Err(ProviderError::DimensionMismatch {
                provider,
                expected,
                actual: vector.len(),
            });
        }
    }
    Ok(vector)
}

pub(crate) fn malformed(provider: ProviderId, reason: String) -> ProviderError {
    ProviderError::MalformedResponse { provider, reason }
}

fn transport_error(provider: ProviderId, config: &ProviderConfig, err: &reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            provider,
            timeout_ms: config.timeout.as_millis() as u64,
        }
    } else {
        ProviderError::Network {
            provider,
            reason: err.to_string(),
        }
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
