//! Linear algebra bridge
//!
//! This module provides the factorization and solve services the pipeline
//! consumes. The Schur form comes from `math::schur`; LU solves use nalgebra
//! as the backend, with all ndarray<->nalgebra conversions contained here so
//! callers only ever see `Array2`.

use nalgebra::linalg::LU;
use nalgebra::{DMatrix, Dyn};
use ndarray::Array2;

use super::schur::{complex_schur_form, hessenberg, real_schur_form};
use crate::constants::SCHUR_ITERATIONS_PER_ROW;
use crate::error::Result;
use crate::scalar::MatrixScalar;

// ============================================================================
// Conversion helpers (internal)
// ============================================================================

/// Convert ndarray Array2 to nalgebra DMatrix
#[inline]
fn to_na<S: MatrixScalar>(a: &Array2<S>) -> DMatrix<S::Na> {
    let (m, n) = a.dim();
    DMatrix::from_fn(m, n, |i, j| a[[i, j]].to_na())
}

/// Convert nalgebra DMatrix to ndarray Array2
#[inline]
fn from_na<S: MatrixScalar>(m: &DMatrix<S::Na>) -> Array2<S> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| S::from_na(m[(i, j)]))
}

// ============================================================================
// Schur factorization
// ============================================================================

/// Schur factorization `A = Q T Q*`
///
/// For real scalars `T` is quasi-upper-triangular (1×1 and 2×2 diagonal
/// blocks); for complex scalars it is upper triangular.
#[derive(Debug, Clone)]
pub struct SchurFactorization<S> {
    /// Unitary (orthogonal) similarity
    pub q: Array2<S>,
    /// (Quasi-)triangular form
    pub t: Array2<S>,
}

/// Compute the Schur factorization of a square matrix
///
/// Real scalars get the real quasi-triangular form, complex scalars the
/// complex triangular form. Entries that the structure forces to zero are
/// exact zeros, so the diagonal block scan can test the subdiagonal
/// against zero.
pub fn schur<S: MatrixScalar>(a: &Array2<S>) -> Result<SchurFactorization<S>> {
    let n = a.nrows();
    let budget = n.max(1) * SCHUR_ITERATIONS_PER_ROW;

    if S::IS_COMPLEX {
        let mut t = a.mapv(|x| x.to_complex());
        let mut q = Array2::eye(n);
        hessenberg(&mut t, &mut q);
        complex_schur_form(&mut t, &mut q, budget)?;
        Ok(SchurFactorization {
            q: q.mapv(S::from_complex),
            t: t.mapv(S::from_complex),
        })
    } else {
        let mut t = a.mapv(|x| x.to_complex().re);
        let mut q = Array2::eye(n);
        hessenberg(&mut t, &mut q);
        real_schur_form(&mut t, &mut q, budget)?;
        Ok(SchurFactorization {
            q: q.mapv(S::from_real),
            t: t.mapv(S::from_real),
        })
    }
}

// ============================================================================
// Linear solve
// ============================================================================

/// LU factorization reused for several right-hand sides
pub struct LuSolver<S: MatrixScalar> {
    lu: LU<S::Na, Dyn, Dyn>,
}

impl<S: MatrixScalar> LuSolver<S> {
    /// Factorize `r` with partial pivoting
    ///
    /// Returns None if `r` is exactly singular.
    pub fn new(r: &Array2<S>) -> Option<Self> {
        let lu = to_na(r).lu();
        if lu.is_invertible() {
            Some(Self { lu })
        } else {
            None
        }
    }

    /// Solve `R X = P` for `X`
    pub fn solve(&self, p: &Array2<S>) -> Option<Array2<S>> {
        self.lu.solve(&to_na(p)).map(|x| from_na(&x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use num_complex::Complex64;

    fn max_abs_diff<S: MatrixScalar>(a: &Array2<S>, b: &Array2<S>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y).modulus())
            .fold(0.0, f64::max)
    }

    fn conj_t<S: MatrixScalar>(a: &Array2<S>) -> Array2<S> {
        a.t().mapv(|x| x.conj())
    }

    #[test]
    fn test_real_schur_reconstructs() {
        let a = array![[4.0, 1.0, -2.0], [3.0, 0.5, 1.0], [-1.0, 2.0, 1.0]];
        let f = schur(&a).unwrap();
        let back = f.q.dot(&f.t).dot(&f.q.t());
        assert!(max_abs_diff(&a, &back) < 1e-13);
        // Nothing below the first subdiagonal
        assert_eq!(f.t[[2, 0]], 0.0);
    }

    #[test]
    fn test_schur_backward_error_at_working_precision() {
        // Seeded LCG entries in [-1, 1)
        let n = 60;
        let mut state = 0x2545_f491_4f6c_dd1d_u64;
        let a = Array2::from_shape_fn((n, n), |_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 52) as f64 - 1.0
        });
        let a_norm = a.iter().map(|x| x * x).sum::<f64>().sqrt();

        let f = schur(&a).unwrap();
        let residual = &f.q.dot(&f.t).dot(&f.q.t()) - &a;
        let res = residual.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!(res < 2e-14 * a_norm, "residual {:e}", res / a_norm);

        let gram = f.q.t().dot(&f.q) - Array2::<f64>::eye(n);
        let orth = gram.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!(orth < 2e-14, "orthogonality {:e}", orth);

        let c = a.mapv(|x| Complex64::new(x, 0.5 * x));
        let f = schur(&c).unwrap();
        let back = f.q.dot(&f.t).dot(&conj_t(&f.q));
        let res = (&back - &c).iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
        assert!(res < 2e-14 * a_norm * 1.25f64.sqrt(), "complex residual {:e}", res);
    }

    #[test]
    fn test_real_schur_keeps_rotation_block() {
        // Rotation generator: eigenvalues ±i, no real triangular form
        let a = array![[0.0, -1.0], [1.0, 0.0]];
        let f = schur(&a).unwrap();
        assert!(f.t[[1, 0]].abs() > 0.5);
    }

    #[test]
    fn test_complex_schur_is_triangular() {
        let a = array![[0.0, -1.0], [1.0, 0.0]].mapv(|x: f64| Complex64::new(x, 0.0));
        let f = schur(&a).unwrap();
        assert_eq!(f.t[[1, 0]], Complex64::new(0.0, 0.0));
        let back = f.q.dot(&f.t).dot(&conj_t(&f.q));
        assert!(max_abs_diff(&a, &back) < 1e-12);
        // Eigenvalues ±i on the diagonal
        assert_relative_eq!(f.t[[0, 0]].norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(f.t[[0, 0]].re, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lu_solve() {
        let r = array![[2.0, 1.0], [1.0, 3.0]];
        let p = array![[3.0, 1.0], [4.0, 0.0]];
        let solver = LuSolver::new(&r).unwrap();
        let x = solver.solve(&p).unwrap();
        assert!(max_abs_diff(&r.dot(&x), &p) < 1e-14);
    }

    #[test]
    fn test_lu_singular() {
        let r = array![[1.0, 2.0], [2.0, 4.0]];
        assert!(LuSolver::new(&r).is_none());
    }
}
