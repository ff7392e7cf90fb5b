//! Matrix operation helpers
//!
//! Small structural predicates and in-place updates that the pipeline
//! uses on dense square matrices.

use ndarray::Array2;

use crate::error::{Result, TrigmError};
use crate::scalar::MatrixScalar;

/// True if every entry strictly below the diagonal is zero
pub fn is_upper_triangular<S: MatrixScalar>(a: &Array2<S>) -> bool {
    a.indexed_iter()
        .all(|((i, j), &v)| i <= j || v == S::zero())
}

/// True if every entry strictly above the diagonal is zero
pub fn is_lower_triangular<S: MatrixScalar>(a: &Array2<S>) -> bool {
    a.indexed_iter()
        .all(|((i, j), &v)| i >= j || v == S::zero())
}

/// Reject non-square or non-finite input
pub fn validate_square_finite<S: MatrixScalar>(a: &Array2<S>) -> Result<()> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(TrigmError::Rectangular { rows, cols });
    }
    if let Some(((row, col), _)) = a.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(TrigmError::NotMatrix { row, col });
    }
    Ok(())
}

/// Multiply every entry by a real factor
#[inline]
pub fn scale_in_place<S: MatrixScalar>(a: &mut Array2<S>, factor: f64) {
    let f = S::from_real(factor);
    a.mapv_inplace(|v| v * f);
}

/// `A - I` in place
#[inline]
pub fn sub_identity_in_place<S: MatrixScalar>(a: &mut Array2<S>) {
    for v in a.diag_mut() {
        *v -= S::one();
    }
}
