//! Matrix 1-norms
//!
//! Exact 1-norm of a materialized matrix and a block estimator for the
//! 1-norm of an operator that is only available through products with
//! its action and its adjoint (e.g. a matrix power that is never formed).
//!
//! # References
//!
//! - N. J. Higham, F. Tisseur, "A Block Algorithm for Matrix 1-Norm
//!   Estimation, with an Application to 1-Norm Pseudospectra",
//!   SIAM J. Matrix Anal. Appl., vol. 21, no. 4, 2000

use ndarray::{Array2, Axis};

use crate::constants::NORMEST_MAX_ITER;
use crate::scalar::MatrixScalar;

/// A square linear operator known through block products
pub trait LinearOperator<S: MatrixScalar> {
    /// Order of the operator
    fn dim(&self) -> usize;
    /// `A X`
    fn apply(&self, x: &Array2<S>) -> Array2<S>;
    /// `A* X`
    fn apply_adjoint(&self, x: &Array2<S>) -> Array2<S>;
}

/// Exact 1-norm (maximum absolute column sum)
pub fn one_norm<S: MatrixScalar>(a: &Array2<S>) -> f64 {
    a.axis_iter(Axis(1))
        .map(|col| col.iter().map(|x| x.modulus()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Conjugate transpose
pub fn adjoint<S: MatrixScalar>(a: &Array2<S>) -> Array2<S> {
    a.t().mapv(|x| x.conj())
}

/// Starting block: first column constant, others fixed ±1 patterns
fn starting_block<S: MatrixScalar>(n: usize, t: usize) -> Array2<S> {
    let inv_n = 1.0 / n as f64;
    Array2::from_shape_fn((n, t), |(i, j)| {
        if j == 0 {
            S::from_real(inv_n)
        } else {
            let bit = (i >> ((j - 1) % usize::BITS as usize)) & 1;
            S::from_real(if bit == 0 { inv_n } else { -inv_n })
        }
    })
}

/// Entrywise sign, with `sign(0) = 1`
fn sign_matrix<S: MatrixScalar>(y: &Array2<S>) -> Array2<S> {
    y.mapv(|v| {
        let r = v.modulus();
        if r == 0.0 {
            S::one()
        } else {
            v * S::from_real(1.0 / r)
        }
    })
}

/// Estimate the 1-norm of `op` with a block of `t` columns
///
/// The estimate is a lower bound on the true norm and is exact for most
/// matrices met in practice. At most `NORMEST_MAX_ITER` sweeps are made.
pub fn normest1<S: MatrixScalar, Op: LinearOperator<S>>(op: &Op, t: usize) -> f64 {
    let n = op.dim();
    if n == 0 {
        return 0.0;
    }
    let t = t.clamp(1, n);

    let mut x = starting_block::<S>(n, t);
    let mut visited = vec![false; n];
    let mut columns: Vec<Option<usize>> = vec![None; t];
    let mut est_old = 0.0;
    let mut best_index: Option<usize> = None;
    let mut s_old: Option<Array2<S>> = None;

    for k in 1..=NORMEST_MAX_ITER {
        let y = op.apply(&x);

        let (best_col, est) = y
            .axis_iter(Axis(1))
            .map(|col| col.iter().map(|v| v.modulus()).sum::<f64>())
            .enumerate()
            .fold((0, 0.0), |acc, (j, v)| if v > acc.1 { (j, v) } else { acc });

        if k >= 2 && est <= est_old {
            return est_old;
        }
        est_old = est;
        if k >= 2 {
            best_index = columns[best_col];
        }
        if k == NORMEST_MAX_ITER {
            break;
        }

        let s = sign_matrix(&y);
        if s_old.as_ref() == Some(&s) {
            break;
        }

        let z = op.apply_adjoint(&s);
        let h: Vec<f64> = z
            .axis_iter(Axis(0))
            .map(|row| row.iter().map(|v| v.modulus()).fold(0.0, f64::max))
            .collect();
        let h_max = h.iter().cloned().fold(0.0, f64::max);
        if let Some(idx) = best_index {
            if k >= 2 && h[idx] >= h_max {
                break;
            }
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| h[b].partial_cmp(&h[a]).unwrap_or(std::cmp::Ordering::Equal));
        let fresh: Vec<usize> = order.into_iter().filter(|&i| !visited[i]).take(t).collect();
        if fresh.is_empty() {
            break;
        }

        x = Array2::zeros((n, t));
        columns = vec![None; t];
        for (j, &i) in fresh.iter().enumerate() {
            x[[i, j]] = S::one();
            visited[i] = true;
            columns[j] = Some(i);
        }
        s_old = Some(s);
    }

    est_old
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use num_complex::Complex64;

    struct Dense<S>(Array2<S>);

    impl<S: MatrixScalar> LinearOperator<S> for Dense<S> {
        fn dim(&self) -> usize {
            self.0.nrows()
        }

        fn apply(&self, x: &Array2<S>) -> Array2<S> {
            self.0.dot(x)
        }

        fn apply_adjoint(&self, x: &Array2<S>) -> Array2<S> {
            adjoint(&self.0).dot(x)
        }
    }

    #[test]
    fn test_one_norm() {
        let a = array![[1.0, -7.0], [-2.0, 3.0]];
        assert_relative_eq!(one_norm(&a), 10.0);
    }

    #[test]
    fn test_one_norm_complex() {
        let a = array![[Complex64::new(3.0, 4.0), Complex64::new(0.0, 1.0)]];
        assert_relative_eq!(one_norm(&a), 5.0);
    }

    #[test]
    fn test_normest_diagonal_is_exact() {
        let mut a = Array2::<f64>::zeros((6, 6));
        for i in 0..6 {
            a[[i, i]] = (i as f64) - 2.5;
        }
        let est = normest1(&Dense(a.clone()), 2);
        assert_relative_eq!(est, one_norm(&a), epsilon = 1e-14);
    }

    #[test]
    fn test_normest_lower_bound() {
        let a = Array2::from_shape_fn((8, 8), |(i, j)| ((3 * i + 5 * j) % 7) as f64 - 3.0);
        let est = normest1(&Dense(a.clone()), 2);
        let exact = one_norm(&a);
        assert!(est <= exact * (1.0 + 1e-14));
        assert!(est >= exact / 3.0);
    }

    #[test]
    fn test_normest_single_heavy_column() {
        let mut a = Array2::<f64>::eye(10);
        for i in 0..10 {
            a[[i, 7]] = 4.0;
        }
        let est = normest1(&Dense(a.clone()), 2);
        assert_relative_eq!(est, one_norm(&a), epsilon = 1e-12);
    }

    #[test]
    fn test_normest_complex() {
        let a = array![
            [Complex64::new(0.0, 2.0), Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 1.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0), Complex64::new(0.5, 0.0)]
        ];
        let est = normest1(&Dense(a.clone()), 2);
        assert!(est <= one_norm(&a) * (1.0 + 1e-14));
        assert!(est >= 2.0);
    }
}
