//! Exact recomputation of diagonal blocks
//!
//! When the working matrix is (quasi-)triangular, the diagonal and first
//! superdiagonal of `cos` and `sin` of its scaled version have closed forms.
//! Overwriting the approximant with them removes the error that the
//! double-angle recurrences would otherwise amplify.
//!
//! All formulas are evaluated in `Complex64` and projected onto the
//! entry type, so a real 2x2 block with complex conjugate eigenvalues
//! needs no special handling.

use ndarray::Array2;
use num_complex::Complex64;

use crate::scalar::MatrixScalar;

/// Function whose exact blocks are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrigFunction {
    Cos,
    Sin,
}

impl TrigFunction {
    #[inline]
    fn eval(self, z: Complex64) -> Complex64 {
        match self {
            Self::Cos => z.cos(),
            Self::Sin => z.sin(),
        }
    }

    /// Divided difference `(f(a) - f(b)) / (a - b)` without cancellation
    fn divided_difference(self, a: Complex64, b: Complex64) -> Complex64 {
        if a == b {
            return match self {
                Self::Cos => -a.sin(),
                Self::Sin => a.cos(),
            };
        }
        let mean = (a + b) * 0.5;
        let half = (a - b) * 0.5;
        match self {
            Self::Cos => -mean.sin() * sinc(half),
            Self::Sin => mean.cos() * sinc(half),
        }
    }
}

/// `sin(z) / z` with the removable singularity filled in
#[inline]
fn sinc(z: Complex64) -> Complex64 {
    if z == Complex64::new(0.0, 0.0) {
        Complex64::new(1.0, 0.0)
    } else {
        z.sin() / z
    }
}

/// Overwrite the diagonal blocks of `f` with their exact values
///
/// `f` approximates `func(T 2^-depth)` where `t` is the (quasi-)triangular
/// working matrix. A nonzero subdiagonal entry marks a full 2x2 block;
/// otherwise the triangular 2x2 block at each position is written, which
/// also fixes the superdiagonal entry between neighbouring blocks.
pub(crate) fn correct_diagonal_blocks<S: MatrixScalar>(
    f: &mut Array2<S>,
    t: &Array2<S>,
    depth: u32,
    func: TrigFunction,
) {
    let n = t.nrows();
    let scale = 0.5f64.powi(depth as i32);
    let entry = |i: usize, j: usize| t[[i, j]].to_complex() * scale;

    let mut j = 0;
    while j < n {
        if j + 1 < n && t[[j + 1, j]] != S::zero() {
            let block = [entry(j, j), entry(j, j + 1), entry(j + 1, j), entry(j + 1, j + 1)];
            write_full_block(f, j, block, func);
            j += 2;
        } else if j + 1 < n && (j + 2 >= n || t[[j + 2, j + 1]] == S::zero()) {
            let (a, b) = (entry(j, j), entry(j + 1, j + 1));
            f[[j, j]] = S::from_complex(func.eval(a));
            f[[j + 1, j + 1]] = S::from_complex(func.eval(b));
            f[[j, j + 1]] = S::from_complex(entry(j, j + 1) * func.divided_difference(a, b));
            j += 1;
        } else {
            f[[j, j]] = S::from_complex(func.eval(entry(j, j)));
            j += 1;
        }
    }
}

/// `func` of `[[a, b], [c, d]]` written at rows/columns `j, j+1`
///
/// With `mu = (a + d) / 2` and `M` the traceless part, `M^2 = kappa I`
/// so `func(mu I + M) = alpha I + beta M` for scalar `alpha`, `beta`.
fn write_full_block<S: MatrixScalar>(
    f: &mut Array2<S>,
    j: usize,
    [a, b, c, d]: [Complex64; 4],
    func: TrigFunction,
) {
    let mu = (a + d) * 0.5;
    let delta = (a - d) * 0.5;
    let phi = (delta * delta + b * c).sqrt();

    let (alpha, beta) = match func {
        TrigFunction::Cos => (mu.cos() * phi.cos(), -mu.sin() * sinc(phi)),
        TrigFunction::Sin => (mu.sin() * phi.cos(), mu.cos() * sinc(phi)),
    };

    f[[j, j]] = S::from_complex(alpha + beta * delta);
    f[[j, j + 1]] = S::from_complex(beta * b);
    f[[j + 1, j]] = S::from_complex(beta * c);
    f[[j + 1, j + 1]] = S::from_complex(alpha - beta * delta);
}
