use super::EmbeddingVector;
use crate::errors::EmbedError;

/// Failure of one position in a batch.
#[derive(Debug, Clone)]
pub struct BatchItemError {
    /// Position in the input texts.
    pub index: usize,
    pub error: EmbedError,
}

/// Positionally aligned batch output.
///
/// `vectors.len()` always equals the number of input texts. Failed positions
/// hold an empty vector and have a matching entry in `errors`.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub vectors: Vec<EmbeddingVector>,
    pub errors: Vec<BatchItemError>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Number of positions that produced a vector.
    pub fn succeeded(&self) -> usize {
        self.vectors.len() - self.errors.len()
    }

    /// The error recorded for a position, if it failed.
    pub fn error_at(&self, index: usize) -> Option<&EmbedError> {
        self.errors
            .iter()
            .find(|e| e.index == index)
            .map(|e| &e.error)
    }

    /// Per-position view: `Ok(vector)` or `Err(error)`.
    pub fn outcomes(&self) -> impl Iterator<Item = Result<&EmbeddingVector, &EmbedError>> + '_ {
        self.vectors
            .iter()
            .enumerate()
            .map(move |(i, v)| match self.error_at(i) {
                Some(e) => Err(e),
                None => Ok(v),
            })
    }
}
