use std::fmt;

/// Which operand of a two-vector operation is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorSide {
    Left,
    Right,
}

impl fmt::Display for VectorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Bad input shape. Never retried and never sent to a provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("text is empty or whitespace-only")]
    EmptyText,

    #[error("{which} vector is empty")]
    EmptyVector { which: VectorSide },

    #[error("vector length mismatch: left has {left}, right has {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("{which} vector has a non-finite value at index {index}")]
    NonFiniteValue { which: VectorSide, index: usize },

    #[error("unknown provider: {name}")]
    UnknownProvider { name: String },

    #[error("invalid option {option}: {reason}")]
    InvalidOption { option: String, reason: String },
}
