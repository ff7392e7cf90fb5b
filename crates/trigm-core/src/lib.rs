//! trigm-core: Matrix cosine and sine
//!
//! Computes `cos(A)`, `sin(A)`, or both at once for square real or complex
//! matrices to full double precision, using scaling and squaring with
//! rational approximants and an optional Schur pre-factorization.
//!
//! ## Modules
//!
//! - `trigm` - Layout selection, parameter selection, approximant
//!   evaluation, double-angle recovery
//! - `math` - Dense helpers, 1-norm estimation, factorization bridge
//! - `options` - Schur mode and run-time options
//! - `error` - Error types

pub mod constants;
pub mod error;
pub mod math;
pub mod options;
pub mod scalar;
pub mod trigm;

pub use error::{ErrorKind, Result, TrigmError};
pub use options::{SchurMode, TrigmOptions};
pub use scalar::MatrixScalar;
pub use trigm::{
    cosm, cosm_with_info, cosmsinm, cosmsinm_with_info, sinm, sinm_with_info, LayoutKind,
    ParameterSet, TrigmInfo,
};
