use meridian_embeddings::cosine_similarity;
use meridian_embeddings::cache::{cache_key, normalize_text};
use proptest::prelude::*;

fn vector_pair() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    prop::collection::vec((-1.0e3f32..1.0e3, -1.0e3f32..1.0e3), 1..128)
        .prop_map(|pairs| pairs.into_iter().unzip())
}

proptest! {
    #[test]
    fn similarity_stays_in_range((a, b) in vector_pair()) {
        let score = cosine_similarity(&a, &b).unwrap();
        prop_assert!((-1.0..=1.0).contains(&score), "score {} out of range", score);
    }

    #[test]
    fn similarity_is_symmetric((a, b) in vector_pair()) {
        prop_assert_eq!(cosine_similarity(&a, &b).unwrap(), cosine_similarity(&b, &a).unwrap());
    }

    #[test]
    fn self_similarity_is_one(a in prop::collection::vec(0.01f32..1.0e3, 1..128)) {
        let score = cosine_similarity(&a, &a).unwrap();
        prop_assert!((score - 1.0).abs() < 1e-9, "self similarity {}", score);
    }

    #[test]
    fn mismatched_lengths_are_rejected(
        a in prop::collection::vec(-1.0f32..1.0, 1..32),
        extra in 1usize..8,
    ) {
        let b = vec![0.5f32; a.len() + extra];
        prop_assert!(cosine_similarity(&a, &b).is_err());
    }

    #[test]
    fn normalization_is_idempotent(s in "[ a-zA-Z\t\n]{0,80}") {
        let once = normalize_text(&s);
        prop_assert_eq!(normalize_text(&once), once.clone());
        prop_assert_eq!(cache_key(&s, "m"), cache_key(&once, "m"));
    }
}
