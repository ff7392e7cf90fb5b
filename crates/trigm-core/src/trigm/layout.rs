//! Working-matrix layout
//!
//! Decides whether the input is used as is, transposed, or replaced by a
//! Schur form, and maps results back to the original basis.

use std::fmt;

use ndarray::Array2;

use crate::error::Result;
use crate::math::linalg::schur;
use crate::math::normest::adjoint;
use crate::math::{is_lower_triangular, is_upper_triangular};
use crate::options::SchurMode;
use crate::scalar::MatrixScalar;

/// Shape of the working matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Input was upper triangular
    UpperTriangular,
    /// Input was lower triangular and is worked on transposed
    LowerTriangular,
    /// Real quasi-triangular Schur form
    RealSchur,
    /// Complex triangular Schur form
    ComplexSchur,
    /// Dense input without a triangular form
    Full,
}

impl LayoutKind {
    /// Whether diagonal blocks can be recomputed exactly
    pub fn is_triangular(&self) -> bool {
        !matches!(self, Self::Full)
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UpperTriangular => "upper triangular",
            Self::LowerTriangular => "lower triangular",
            Self::RealSchur => "real Schur",
            Self::ComplexSchur => "complex Schur",
            Self::Full => "full",
        };
        write!(f, "{}", s)
    }
}

/// How to return from the working basis
#[derive(Debug, Clone)]
pub(crate) enum Basis<S> {
    Identity,
    Transposed,
    /// `A = Q T Q*`
    Similarity(Array2<S>),
}

/// Working matrix and the way back
#[derive(Debug, Clone)]
pub(crate) struct Layout<S> {
    pub t: Array2<S>,
    pub basis: Basis<S>,
    pub kind: LayoutKind,
}

impl<S: MatrixScalar> Layout<S> {
    /// Pick the layout of a validated square matrix
    ///
    /// Triangular input is detected before `mode` is consulted. A complex
    /// input asking for the real Schur form gets the complex one, which is
    /// the only Schur form complex entries have.
    pub fn select(a: &Array2<S>, mode: SchurMode) -> Result<Self> {
        if is_lower_triangular(a) {
            return Ok(Self {
                t: a.t().to_owned(),
                basis: Basis::Transposed,
                kind: LayoutKind::LowerTriangular,
            });
        }
        if is_upper_triangular(a) {
            return Ok(Self {
                t: a.clone(),
                basis: Basis::Identity,
                kind: LayoutKind::UpperTriangular,
            });
        }
        match mode {
            SchurMode::None => Ok(Self {
                t: a.clone(),
                basis: Basis::Identity,
                kind: LayoutKind::Full,
            }),
            SchurMode::Real | SchurMode::Complex => {
                let f = schur(a)?;
                let kind = if S::IS_COMPLEX {
                    LayoutKind::ComplexSchur
                } else {
                    LayoutKind::RealSchur
                };
                Ok(Self {
                    t: f.t,
                    basis: Basis::Similarity(f.q),
                    kind,
                })
            }
        }
    }

    /// Map a function of `t` back to a function of the input
    pub fn restore(&self, f: Array2<S>) -> Array2<S> {
        match &self.basis {
            Basis::Identity => f,
            Basis::Transposed => f.t().to_owned(),
            Basis::Similarity(q) => q.dot(&f).dot(&adjoint(q)),
        }
    }
}
