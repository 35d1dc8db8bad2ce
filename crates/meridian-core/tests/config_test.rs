use std::collections::HashMap;
use std::io::Write;

use meridian_core::config::*;
use meridian_core::errors::ConfigError;
use meridian_core::ProviderId;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = MeridianConfig::from_toml("").unwrap();

    // Embedding defaults
    assert_eq!(config.embedding.provider, ProviderId::Remote);
    assert_eq!(config.embedding.fallback_provider, Some(ProviderId::Local));
    assert_eq!(config.embedding.max_retries, 3);
    assert_eq!(config.embedding.backoff_factor, 2.0);
    assert_eq!(config.embedding.base_delay_ms, 1_000);

    // Provider defaults
    assert_eq!(config.providers.remote.model, "text-embedding-3-small");
    assert_eq!(config.providers.remote.timeout_ms, 10_000);
    assert_eq!(config.providers.local.api_url, "http://localhost:5000/embed");
    assert_eq!(config.providers.local.dimensions, Some(384));

    // Breaker defaults
    assert_eq!(config.breaker.failure_threshold, 5);
    assert_eq!(config.breaker.reset_timeout_ms, 30_000);

    // Cache + batch defaults
    assert_eq!(config.cache.max_entries, 10_000);
    assert_eq!(config.batch.chunk_size, 20);
    assert_eq!(config.batch.pacing_delay_ms, 1_000);

    assert_eq!(config.observability.log_level, "info");
    config.validate().unwrap();
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[embedding]
provider = "local"
fallback_provider = "remote"

[providers.local]
api_url = "http://embedder.internal:5000/embed"

[breaker]
failure_threshold = 3
"#;
    let config = MeridianConfig::from_toml(toml).unwrap();
    assert_eq!(config.embedding.provider, ProviderId::Local);
    assert_eq!(config.embedding.fallback_provider, Some(ProviderId::Remote));
    assert_eq!(
        config.providers.local.api_url,
        "http://embedder.internal:5000/embed"
    );
    // Keys the table omits keep that provider's defaults.
    assert_eq!(config.providers.local.model, "all-MiniLM-L6-v2");
    assert_eq!(config.providers.remote.model, "text-embedding-3-small");
    assert_eq!(config.breaker.failure_threshold, 3);
    assert_eq!(config.breaker.reset_timeout_ms, 30_000);
}

#[test]
fn config_rejects_unknown_provider_name() {
    let err = MeridianConfig::from_toml("[embedding]\nprovider = \"cohere\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validate_rejects_zero_chunk_size() {
    let mut config = MeridianConfig::default();
    config.batch.chunk_size = 0;
    match config.validate() {
        Err(ConfigError::ValidationFailed { field, .. }) => assert_eq!(field, "batch.chunk_size"),
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn validate_rejects_shrinking_backoff() {
    let mut config = MeridianConfig::default();
    config.embedding.backoff_factor = 0.5;
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_zero_failure_threshold() {
    let mut config = MeridianConfig::default();
    config.breaker.failure_threshold = 0;
    assert!(config.validate().is_err());
}

#[test]
fn env_overrides_apply_on_top_of_file_values() {
    let mut config = MeridianConfig::from_toml("[batch]\nchunk_size = 50\n").unwrap();
    let env: HashMap<&str, &str> = HashMap::from([
        ("MERIDIAN_PROVIDER", "local"),
        ("MERIDIAN_FALLBACK_PROVIDER", "none"),
        ("MERIDIAN_REMOTE_API_KEY", "sk-env"),
        ("MERIDIAN_LOCAL_TIMEOUT_MS", "2500"),
        ("MERIDIAN_BATCH_CHUNK_SIZE", "10"),
        ("MERIDIAN_BREAKER_FAILURE_THRESHOLD", "not-a-number"),
    ]);
    config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.embedding.provider, ProviderId::Local);
    assert_eq!(config.embedding.fallback_provider, None);
    assert_eq!(config.providers.remote.api_key.as_deref(), Some("sk-env"));
    assert_eq!(config.providers.local.timeout_ms, 2_500);
    assert_eq!(config.batch.chunk_size, 10);
    // Unparseable values are ignored.
    assert_eq!(config.breaker.failure_threshold, 5);
}

#[test]
fn openai_key_is_used_when_no_remote_key_configured() {
    let mut config = MeridianConfig::default();
    config.apply_overrides_from(|key| (key == "OPENAI_API_KEY").then(|| "sk-openai".to_string()));
    assert_eq!(config.providers.remote.api_key.as_deref(), Some("sk-openai"));

    let mut configured = MeridianConfig::from_toml("[providers.remote]\napi_key = \"sk-file\"\n").unwrap();
    configured.apply_overrides_from(|key| (key == "OPENAI_API_KEY").then(|| "sk-openai".to_string()));
    assert_eq!(configured.providers.remote.api_key.as_deref(), Some("sk-file"));
}

#[test]
fn from_file_reads_toml_and_reports_missing_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[cache]\nmax_entries = 42").unwrap();
    let config = MeridianConfig::from_file(file.path()).unwrap();
    assert_eq!(config.cache.max_entries, 42);

    let missing = MeridianConfig::from_file(std::path::Path::new("/nonexistent/meridian.toml"));
    assert!(matches!(missing, Err(ConfigError::FileNotFound { .. })));
}

#[test]
fn config_round_trips_through_toml() {
    let mut config = MeridianConfig::default();
    config.embedding.fallback_provider = None;
    config.batch.chunk_size = 7;
    let rendered = config.to_toml().unwrap();
    let parsed = MeridianConfig::from_toml(&rendered).unwrap();
    assert_eq!(parsed.batch.chunk_size, 7);
    assert_eq!(parsed.embedding.fallback_provider, None);
    assert_eq!(parsed.providers, config.providers);
}
