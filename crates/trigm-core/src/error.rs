//! Error types for matrix trigonometric functions

use thiserror::Error;

/// Broad classification of a [`TrigmError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The argument is not a finite square matrix
    InvalidInput,
    /// An option value is not supported
    InvalidOption,
    /// The degree/scaling ladder could not satisfy its bound
    ParameterSelectionFailure,
    /// A collaborating linear algebra routine failed
    Numerical,
}

/// Errors raised by `cosm`, `sinm` and `cosmsinm`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrigmError {
    #[error("Matrix entry ({row}, {col}) is not finite")]
    NotMatrix { row: usize, col: usize },

    #[error("Matrix must be square, got {rows}x{cols}")]
    Rectangular { rows: usize, cols: usize },

    #[error("Invalid Schur mode: {0} (expected 0/none, 1/real or 2/complex)")]
    InvalidSchur(String),

    #[error("No scaling/degree pair satisfies the backward error bound (norm quantity {norm:e})")]
    ParameterSelection { norm: f64 },

    #[error("No approximant of degree {degree} (supported: 1, 2, 3, 4, 6, 8, 10, 12, 15, 18, 21)")]
    UnsupportedDegree { degree: usize },

    #[error("Schur factorization of a {n}x{n} matrix did not converge")]
    SchurFailed { n: usize },

    #[error("Denominator of the degree {degree} approximant is singular")]
    SingularDenominator { degree: usize },
}

impl TrigmError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrigmError::NotMatrix { .. } | TrigmError::Rectangular { .. } => {
                ErrorKind::InvalidInput
            }
            TrigmError::InvalidSchur(_) => ErrorKind::InvalidOption,
            TrigmError::ParameterSelection { .. } | TrigmError::UnsupportedDegree { .. } => {
                ErrorKind::ParameterSelectionFailure
            }
            TrigmError::SchurFailed { .. } | TrigmError::SingularDenominator { .. } => {
                ErrorKind::Numerical
            }
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TrigmError>;
