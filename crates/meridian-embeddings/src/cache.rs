//! In-memory vector cache using moka.
//!
//! Keys are blake3 hashes of the model name and the normalized text, so the
//! same text embedded by two models never collides. Bounded by entry count;
//! entries are never expired by time.

use meridian_core::EmbeddingVector;
use moka::sync::Cache;

/// Vector cache shared by every request in a [`ResilienceContext`](crate::ResilienceContext).
pub struct VectorCache {
    cache: Cache<String, EmbeddingVector>,
}

impl VectorCache {
    /// Create a cache holding at most `max_entries` vectors.
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    pub fn get(&self, text: &str, model: &str) -> Option<EmbeddingVector> {
        self.cache.get(&cache_key(text, model))
    }

    pub fn insert(&self, text: &str, model: &str, vector: EmbeddingVector) {
        self.cache.insert(cache_key(text, model), vector);
    }

    /// Approximate number of cached vectors.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl std::fmt::Debug for VectorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

/// Trim and collapse runs of whitespace to a single space. Case is kept.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Hex blake3 digest of `model`, a NUL separator, and the normalized text.
pub fn cache_key(text: &str, model: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(model.as_bytes());
    hasher.update(&[0]);
    hasher.update(normalize_text(text).as_bytes());
    hasher.finalize().to_hex().to_string()
}
