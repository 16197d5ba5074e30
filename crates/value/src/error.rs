//! Value error types

use thiserror::Error;

use crate::ValueKind;

/// Errors produced when extracting a concrete type out of a [`Value`](crate::Value).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The value holds a different kind than the one requested
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: ValueKind,
    },

    /// A JSON number could not be represented by any numeric variant
    #[error("Unsupported JSON number: {0}")]
    UnsupportedNumber(String),
}

impl ValueError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: &'static str, actual: ValueKind) -> Self {
        Self::TypeMismatch { expected, actual }
    }
}

/// Result alias for value operations
pub type ValueResult<T> = Result<T, ValueError>;
