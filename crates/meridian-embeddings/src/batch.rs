//! Batch coordinator.
//!
//! Texts are split into chunks of `batch.chunk_size`. Calls within a chunk
//! run concurrently and all settle before the next chunk starts; chunks are
//! separated by `batch.pacing_delay_ms`. Failures stay positional.
//! Texts that normalize to the same string within a chunk share one call.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::join_all;
use meridian_core::{BatchItemError, BatchResult, EmbedError, EmbedOptions, EmbedResult};
use meridian_observability::batch_span;
use meridian_observability::tracing_setup::events;
use tracing::Instrument;

use crate::cache::normalize_text;
use crate::engine::Embedder;

impl Embedder {
    /// Embed many texts, collecting per-position failures.
    ///
    /// Returns `BatchFailed` only when every position failed. An empty input
    /// yields an empty result.
    pub async fn embed_batch<S>(&self, texts: &[S], options: &EmbedOptions) -> EmbedResult<BatchResult>
    where
        S: AsRef<str> + Sync,
    {
        let total = texts.len();
        if total == 0 {
            return Ok(BatchResult::default());
        }
        let chunk_size = self.config().batch.chunk_size.max(1);
        let chunks = total.div_ceil(chunk_size);
        let pacing = Duration::from_millis(self.config().batch.pacing_delay_ms);

        async move {
            let mut vectors = Vec::with_capacity(total);
            let mut errors = Vec::new();

            for (chunk_index, chunk) in texts.chunks(chunk_size).enumerate() {
                if chunk_index > 0 && !pacing.is_zero() {
                    tokio::time::sleep(pacing).await;
                }
                let offset = chunk_index * chunk_size;
                let (unique, slots) = dedupe(chunk);
                let outcomes = join_all(unique.iter().map(|t| self.embed(t, options))).await;

                let mut failed = 0;
                for (i, slot) in slots.into_iter().enumerate() {
                    match &outcomes[slot] {
                        Ok(vector) => vectors.push(vector.clone()),
                        Err(error) => {
                            vectors.push(Vec::new());
                            errors.push(BatchItemError {
                                index: offset + i,
                                error: error.clone(),
                            });
                            failed += 1;
                        }
                    }
                }
                events::batch_chunk_completed(chunk_index + 1, chunks, chunk.len() - failed, failed);
            }

            if errors.len() == total {
                return Err(EmbedError::BatchFailed { total, errors });
            }
            Ok(BatchResult { vectors, errors })
        }
        .instrument(batch_span!(total, chunks))
        .await
    }
}

/// Distinct texts of `chunk` in first-seen order, and for each position the
/// index of its text among them. Options are shared across the batch, so
/// equal normalized text means an equal cache key.
fn dedupe<S: AsRef<str>>(chunk: &[S]) -> (Vec<&str>, Vec<usize>) {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(chunk.len());
    let mut unique = Vec::with_capacity(chunk.len());
    let slots = chunk
        .iter()
        .map(|text| {
            let text = text.as_ref();
            *seen.entry(normalize_text(text)).or_insert_with(|| {
                unique.push(text);
                unique.len() - 1
            })
        })
        .collect();
    (unique, slots)
}
