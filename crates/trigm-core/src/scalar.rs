//! Scalar abstraction over real and complex matrix entries
//!
//! The pipeline is generic over `f64` and `Complex64`. Closed-form block
//! formulas are evaluated in `Complex64` and projected back, so the real
//! path can pass through complex intermediates (e.g. `sqrt` of a negative
//! discriminant) without a separate code path.

use std::fmt::Debug;
use std::ops::{AddAssign, MulAssign, SubAssign};

use ndarray::{LinalgScalar, ScalarOperand};
use num_complex::Complex64;

/// Entry type of a matrix the trigonometric functions accept
pub trait MatrixScalar:
    LinalgScalar
    + ScalarOperand
    + AddAssign
    + SubAssign
    + MulAssign
    + PartialEq
    + Debug
    + Send
    + Sync
{
    /// Matching `nalgebra` scalar for factorization and solves
    type Na: nalgebra::ComplexField<RealField = f64> + Copy;

    /// Whether entries carry an imaginary part
    const IS_COMPLEX: bool;

    fn from_real(x: f64) -> Self;
    fn to_complex(self) -> Complex64;
    /// Projection from `Complex64` (real types keep the real part)
    fn from_complex(z: Complex64) -> Self;
    fn modulus(self) -> f64;
    fn conj(self) -> Self;
    fn is_finite(self) -> bool;
    fn to_na(self) -> Self::Na;
    fn from_na(x: Self::Na) -> Self;
}

impl MatrixScalar for f64 {
    type Na = f64;
    const IS_COMPLEX: bool = false;

    #[inline]
    fn from_real(x: f64) -> Self {
        x
    }

    #[inline]
    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }

    #[inline]
    fn from_complex(z: Complex64) -> Self {
        z.re
    }

    #[inline]
    fn modulus(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn conj(self) -> Self {
        self
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    #[inline]
    fn to_na(self) -> f64 {
        self
    }

    #[inline]
    fn from_na(x: f64) -> Self {
        x
    }
}

impl MatrixScalar for Complex64 {
    type Na = nalgebra::Complex<f64>;
    const IS_COMPLEX: bool = true;

    #[inline]
    fn from_real(x: f64) -> Self {
        Complex64::new(x, 0.0)
    }

    #[inline]
    fn to_complex(self) -> Complex64 {
        self
    }

    #[inline]
    fn from_complex(z: Complex64) -> Self {
        z
    }

    #[inline]
    fn modulus(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex64::conj(&self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        Complex64::is_finite(self)
    }

    #[inline]
    fn to_na(self) -> nalgebra::Complex<f64> {
        nalgebra::Complex::new(self.re, self.im)
    }

    #[inline]
    fn from_na(x: nalgebra::Complex<f64>) -> Self {
        Complex64::new(x.re, x.im)
    }
}
