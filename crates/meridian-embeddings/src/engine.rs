//! Embedder: the failover orchestrator and main entry point.
//!
//! For each provider tier: cache lookup, breaker admission, retried call
//! (each attempt bounded by the provider timeout), cache write. A failed
//! primary falls through to the fallback, except on credential failures,
//! which are surfaced as-is.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use meridian_core::models::FailoverEvent;
use meridian_core::{
    EmbedError, EmbedOptions, EmbedResult, EmbeddingVector, MeridianConfig, ProviderConfig,
    ProviderError, RequestPlan, ValidationError,
};
use meridian_observability::tracing_setup::events;
use meridian_observability::{embed_span, EmbeddingMetrics};
use tokio::time::Instant;
use tracing::{debug, info, warn, Instrument};

use crate::context::ResilienceContext;
use crate::providers::ProviderSet;
use crate::retry::RetryPolicy;

/// The embedding engine.
///
/// Cheap to share behind an `Arc`; all methods take `&self`. Breaker and
/// cache state live in the [`ResilienceContext`], which several engines
/// may share.
pub struct Embedder {
    config: MeridianConfig,
    providers: ProviderSet,
    context: Arc<ResilienceContext>,
    metrics: Mutex<EmbeddingMetrics>,
    failover_events: Mutex<Vec<FailoverEvent>>,
}

impl Embedder {
    /// Engine with its own fresh resilience context.
    pub fn new(config: MeridianConfig, providers: ProviderSet) -> Self {
        let context = Arc::new(ResilienceContext::new(&config));
        Self::with_context(config, providers, context)
    }

    /// Engine sharing breaker and cache state with other engines.
    pub fn with_context(
        config: MeridianConfig,
        providers: ProviderSet,
        context: Arc<ResilienceContext>,
    ) -> Self {
        info!(
            provider = %config.embedding.provider,
            fallback = ?config.embedding.fallback_provider,
            max_retries = config.embedding.max_retries,
            "Embedder initialized"
        );
        Self {
            config,
            providers,
            context,
            metrics: Mutex::new(EmbeddingMetrics::new()),
            failover_events: Mutex::new(Vec::new()),
        }
    }

    /// Engine with the HTTP provider clients.
    pub fn from_config(config: MeridianConfig) -> Self {
        Self::new(config, ProviderSet::http())
    }

    pub fn config(&self) -> &MeridianConfig {
        &self.config
    }

    pub fn context(&self) -> &Arc<ResilienceContext> {
        &self.context
    }

    /// Snapshot of the metrics collected so far.
    pub fn metrics(&self) -> EmbeddingMetrics {
        self.lock_metrics().clone()
    }

    /// Drain accumulated failover events.
    pub fn drain_failover_events(&self) -> Vec<FailoverEvent> {
        std::mem::take(
            &mut *self
                .failover_events
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Embed one text, failing over to the fallback provider if needed.
    pub async fn embed(&self, text: &str, options: &EmbedOptions) -> EmbedResult<EmbeddingVector> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        let plan = RequestPlan::resolve(&self.config, options)?;
        let span = embed_span!(plan.primary.id, plan.primary.model);
        self.embed_with_plan(text, &plan).instrument(span).await
    }

    async fn embed_with_plan(&self, text: &str, plan: &RequestPlan) -> EmbedResult<EmbeddingVector> {
        let primary_err = match self.try_provider(text, &plan.primary).await {
            Ok(vector) => return Ok(vector),
            Err(e) => e,
        };

        if primary_err.is_authentication() {
            return Err(primary_err);
        }
        let Some(fallback) = plan.fallback.as_ref() else {
            return Err(primary_err);
        };

        match self.try_provider(text, fallback).await {
            Ok(vector) => {
                let reason = primary_err.to_string();
                events::provider_failover(plan.primary.id, fallback.id, &reason);
                self.lock_metrics().record_failover();
                self.failover_events
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(FailoverEvent {
                        primary: plan.primary.id,
                        fallback: fallback.id,
                        reason,
                        timestamp: Utc::now(),
                    });
                Ok(vector)
            }
            Err(fallback_err) => Err(EmbedError::FailoverExhausted {
                primary_provider: plan.primary.id,
                primary: Box::new(primary_err),
                fallback_provider: fallback.id,
                fallback: Box::new(fallback_err),
            }),
        }
    }

    /// One provider tier: cache, breaker, retried call, cache write.
    async fn try_provider(&self, text: &str, config: &ProviderConfig) -> EmbedResult<EmbeddingVector> {
        let cache = self.context.cache();
        if let Some(vector) = cache.get(text, &config.model) {
            self.lock_metrics().record_lookup(true);
            debug!(provider = %config.id, model = %config.model, "cache hit");
            return Ok(vector);
        }
        self.lock_metrics().record_lookup(false);

        let breaker = self.context.breakers().get(config.id);
        let Some(permit) = breaker.try_acquire() else {
            self.lock_metrics().record_breaker_rejection(config.id);
            debug!(provider = %config.id, "circuit open, call refused");
            return Err(EmbedError::CircuitOpen {
                provider: config.id,
            });
        };

        let provider = self.providers.get(config.id);
        let timeout_ms = config.timeout.as_millis() as u64;
        let started = Instant::now();
        let result = RetryPolicy::from(config)
            .run(|| async {
                match tokio::time::timeout(config.timeout, provider.generate(text, config)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(ProviderError::Timeout {
                        provider: config.id,
                        timeout_ms,
                    }),
                }
            })
            .await;
        self.lock_metrics()
            .record_call(config.id, result.is_ok(), started.elapsed());

        match result {
            Ok(vector) => {
                permit.succeed();
                cache.insert(text, &config.model, vector.clone());
                Ok(vector)
            }
            Err(e) => {
                permit.fail();
                warn!(provider = %config.id, error = %e, "provider failed");
                Err(e.into())
            }
        }
    }

    fn lock_metrics(&self) -> MutexGuard<'_, EmbeddingMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Embedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Embedder")
            .field("provider", &self.config.embedding.provider)
            .field("fallback", &self.config.embedding.fallback_provider)
            .field("context", &self.context)
            .finish()
    }
}
