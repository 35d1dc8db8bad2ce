//! Cosine similarity between embedding vectors.

use meridian_core::errors::VectorSide;
use meridian_core::ValidationError;

/// Cosine similarity of `a` and `b`, in `[-1.0, 1.0]`.
///
/// Both vectors must be non-empty, of equal length, and finite. A vector
/// with zero magnitude scores 0.0. Products are accumulated in f64.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, ValidationError> {
    if a.is_empty() {
        return Err(ValidationError::EmptyVector { which: VectorSide::Left });
    }
    if b.is_empty() {
        return Err(ValidationError::EmptyVector { which: VectorSide::Right });
    }
    if a.len() != b.len() {
        return Err(ValidationError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    check_finite(a, VectorSide::Left)?;
    check_finite(b, VectorSide::Right)?;

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / denom).clamp(-1.0, 1.0))
}

fn check_finite(v: &[f32], which: VectorSide) -> Result<(), ValidationError> {
    match v.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(ValidationError::NonFiniteValue { which, index }),
        None => Ok(()),
    }
}
