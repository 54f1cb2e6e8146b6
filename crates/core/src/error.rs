//! Error types for paramorph

use thiserror::Error;

/// Main error type for paramorph operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid volume dimensions: {0:?}")]
    InvalidDimensions(Vec<usize>),

    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("index out of bounds: {index:?} in volume of shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for paramorph operations
pub type Result<T> = std::result::Result<T, Error>;
