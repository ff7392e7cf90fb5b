//! Mathematical building blocks
//!
//! Dense matrix helpers, 1-norm estimation, the Schur decomposition and
//! the bridge to the solve backend.

pub mod linalg;
pub mod matrix_ops;
pub mod normest;
mod schur;

pub use matrix_ops::*;
pub use normest::{normest1, one_norm, LinearOperator};
