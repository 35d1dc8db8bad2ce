use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meridian_core::{EmbedOptions, ProviderId};
use meridian_embeddings::cache::cache_key;
use meridian_embeddings::{cosine_similarity, Embedder, ProviderSet, VectorCache};
use test_fixtures::{fast_config, vector_for, ScriptedProvider};

fn bench_cosine(c: &mut Criterion) {
    let a = vector_for("left", 384);
    let b = vector_for("right", 384);
    c.bench_function("cosine_similarity_384", |bench| {
        bench.iter(|| cosine_similarity(black_box(&a), black_box(&b)).unwrap())
    });

    let a = vector_for("left", 1536);
    let b = vector_for("right", 1536);
    c.bench_function("cosine_similarity_1536", |bench| {
        bench.iter(|| cosine_similarity(black_box(&a), black_box(&b)).unwrap())
    });
}

fn bench_cache_key(c: &mut Criterion) {
    let text = "  rust   programming language\tsystems design patterns  ";
    c.bench_function("cache_key", |bench| {
        bench.iter(|| cache_key(black_box(text), black_box("text-embedding-3-small")))
    });
}

fn bench_cache_lookup(c: &mut Criterion) {
    let cache = VectorCache::new(10_000);
    cache.insert("cached text", "model", vector_for("cached text", 384));
    c.bench_function("vector_cache_hit", |bench| {
        bench.iter(|| cache.get(black_box("cached text"), "model").unwrap())
    });
}

fn bench_embed_cache_hit(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let providers = ProviderSet::new(
        Arc::new(ScriptedProvider::healthy(ProviderId::Remote, 384)),
        Arc::new(ScriptedProvider::healthy(ProviderId::Local, 384)),
    );
    let embedder = Embedder::new(fast_config(), providers);
    let options = EmbedOptions::default();
    rt.block_on(embedder.embed("cached query text", &options)).unwrap();

    c.bench_function("embed_cache_hit", |bench| {
        bench.iter(|| rt.block_on(embedder.embed(black_box("cached query text"), &options)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_cosine,
    bench_cache_key,
    bench_cache_lookup,
    bench_embed_cache_hit
);
criterion_main!(benches);
