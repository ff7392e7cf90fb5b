//! Matrix cosine and sine
//!
//! Scaling and squaring with rational approximants:
//!
//! 1. Pick a working matrix `T` (input, its transpose, or a Schur form)
//! 2. Select `s` and a degree `m` from 1-norms of powers of `B = T^2`
//! 3. Evaluate the degree-`m` approximant at `T 2^-s`
//! 4. Recover the unscaled result with `s` double-angle steps, rewriting
//!    diagonal blocks exactly when `T` is (quasi-)triangular
//! 5. Map back to the input basis
//!
//! # Example
//!
//! ```rust,ignore
//! use ndarray::array;
//! use trigm_core::{cosm, SchurMode};
//!
//! let a = array![[0.0, 1.0], [-1.0, 0.0]];
//! let c = cosm(&a, SchurMode::Real)?;
//! ```

mod approximant;
mod blocks;
mod coefficients;
mod layout;
mod params;
mod powers;
mod squaring;

pub use layout::LayoutKind;
pub use params::ParameterSet;

use ndarray::Array2;
use num_complex::Complex64;

use crate::constants::{MAX_SCALING, PRESCALE_EXPONENT};
use crate::error::Result;
use crate::math::{scale_in_place, validate_square_finite};
use crate::options::{SchurMode, TrigmOptions};
use crate::scalar::MatrixScalar;

use approximant::{approximate_cos, approximate_cos_sin, approximate_sin};
use blocks::{correct_diagonal_blocks, TrigFunction};
use layout::Layout;
use params::select_parameters;
use powers::PowerTable;
use squaring::double_angle;

/// Diagnostics of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrigmInfo {
    /// Working-matrix layout that was used
    pub layout: LayoutKind,
    /// Number of double-angle steps `s`
    pub scaling: u32,
    /// Approximant degree `m`
    pub degree: usize,
}

impl TrigmInfo {
    fn empty() -> Self {
        Self {
            layout: LayoutKind::UpperTriangular,
            scaling: 0,
            degree: 1,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Matrix cosine of `a`
pub fn cosm<S: MatrixScalar>(a: &Array2<S>, schur: SchurMode) -> Result<Array2<S>> {
    cosm_with_info(a, &schur.into()).map(|(c, _)| c)
}

/// Matrix sine of `a`
pub fn sinm<S: MatrixScalar>(a: &Array2<S>, schur: SchurMode) -> Result<Array2<S>> {
    sinm_with_info(a, &schur.into()).map(|(s, _)| s)
}

/// Matrix cosine and sine of `a`, returned as `(cos, sin)`
pub fn cosmsinm<S: MatrixScalar>(
    a: &Array2<S>,
    schur: SchurMode,
) -> Result<(Array2<S>, Array2<S>)> {
    cosmsinm_with_info(a, &schur.into()).map(|(cs, _)| cs)
}

/// Matrix cosine with diagnostics
pub fn cosm_with_info<S: MatrixScalar>(
    a: &Array2<S>,
    options: &TrigmOptions,
) -> Result<(Array2<S>, TrigmInfo)> {
    validate_square_finite(a)?;
    if a.is_empty() {
        return Ok((a.clone(), TrigmInfo::empty()));
    }
    if lifts::<S>(options) {
        let (c, info) = cos_pipeline(&lift(a), options)?;
        return Ok((project(&c), info));
    }
    cos_pipeline(a, options)
}

/// Matrix sine with diagnostics
pub fn sinm_with_info<S: MatrixScalar>(
    a: &Array2<S>,
    options: &TrigmOptions,
) -> Result<(Array2<S>, TrigmInfo)> {
    validate_square_finite(a)?;
    if a.is_empty() {
        return Ok((a.clone(), TrigmInfo::empty()));
    }
    if lifts::<S>(options) {
        let (s, info) = sin_pipeline(&lift(a), options)?;
        return Ok((project(&s), info));
    }
    sin_pipeline(a, options)
}

/// Matrix cosine and sine with diagnostics
pub fn cosmsinm_with_info<S: MatrixScalar>(
    a: &Array2<S>,
    options: &TrigmOptions,
) -> Result<((Array2<S>, Array2<S>), TrigmInfo)> {
    validate_square_finite(a)?;
    if a.is_empty() {
        return Ok(((a.clone(), a.clone()), TrigmInfo::empty()));
    }
    if lifts::<S>(options) {
        let ((c, s), info) = cos_sin_pipeline(&lift(a), options)?;
        return Ok(((project(&c), project(&s)), info));
    }
    cos_sin_pipeline(a, options)
}

// ============================================================================
// Pipeline
// ============================================================================

/// Real input asked for the complex Schur form
#[inline]
fn lifts<S: MatrixScalar>(options: &TrigmOptions) -> bool {
    !S::IS_COMPLEX && options.schur == SchurMode::Complex
}

fn lift<S: MatrixScalar>(a: &Array2<S>) -> Array2<Complex64> {
    a.mapv(|x| x.to_complex())
}

fn project<S: MatrixScalar>(a: &Array2<Complex64>) -> Array2<S> {
    a.mapv(S::from_complex)
}

/// Halvings `k` with `||T 2^-k||_1 <= 2^PRESCALE_EXPONENT`
///
/// Entries are shrunk before summing so the norm of a finite matrix never
/// overflows on the way.
fn prescaling<S: MatrixScalar>(t: &Array2<S>) -> u32 {
    let shrink = S::from_real(0.5f64.powi(PRESCALE_EXPONENT));
    let mut norm = t
        .columns()
        .into_iter()
        .map(|col| col.iter().map(|&x| (x * shrink).modulus()).sum::<f64>())
        .fold(0.0, f64::max);
    let mut k = 0;
    while norm > 1.0 && k < MAX_SCALING {
        norm *= 0.5;
        k += 1;
    }
    k
}

/// Layout, scaled power table and parameters of one call
struct Prepared<S: MatrixScalar> {
    layout: Layout<S>,
    table: PowerTable<S>,
    params: ParameterSet,
    /// Part of `params.s` applied before the powers were formed
    prescale: u32,
}

impl<S: MatrixScalar> Prepared<S> {
    fn new(a: &Array2<S>, options: &TrigmOptions) -> Result<Self> {
        let layout = Layout::select(a, options.schur)?;
        let prescale = prescaling(&layout.t);
        let mut table = if prescale > 0 {
            let mut t = layout.t.clone();
            scale_in_place(&mut t, 0.5f64.powi(prescale as i32));
            PowerTable::new(&t, options.normest_columns)
        } else {
            PowerTable::new(&layout.t, options.normest_columns)
        };

        let selected = select_parameters(&mut table)?;
        let params = ParameterSet {
            s: selected.s + prescale,
            m: selected.m,
        };
        log::debug!(
            "trigm: n = {}, layout = {}, s = {} (prescaled {}), m = {}",
            a.nrows(),
            layout.kind,
            params.s,
            prescale,
            params.m
        );
        Ok(Self {
            layout,
            table: table.scaled(selected.s),
            params,
            prescale,
        })
    }

    fn info(&self) -> TrigmInfo {
        TrigmInfo {
            layout: self.layout.kind,
            scaling: self.params.s,
            degree: self.params.m,
        }
    }

    /// `T 2^-s`
    fn scaled_t(&self) -> Array2<S> {
        let mut t = self.layout.t.clone();
        scale_in_place(&mut t, 0.5f64.powi(self.prescale as i32));
        scale_in_place(&mut t, 0.5f64.powi((self.params.s - self.prescale) as i32));
        t
    }

    /// Working matrix when its diagonal blocks can be recomputed
    fn correction(&self) -> Option<&Array2<S>> {
        self.layout.kind.is_triangular().then_some(&self.layout.t)
    }
}

fn cos_pipeline<S: MatrixScalar>(
    a: &Array2<S>,
    options: &TrigmOptions,
) -> Result<(Array2<S>, TrigmInfo)> {
    let mut prep = Prepared::new(a, options)?;
    let info = prep.info();
    let params = prep.params;

    let mut cos = approximate_cos(&mut prep.table, &params)?;
    let correction = prep.correction();
    if let Some(t) = correction {
        correct_diagonal_blocks(&mut cos, t, params.s, TrigFunction::Cos);
    }
    double_angle(&mut cos, None, params.s, correction);

    Ok((prep.layout.restore(cos), info))
}

fn sin_pipeline<S: MatrixScalar>(
    a: &Array2<S>,
    options: &TrigmOptions,
) -> Result<(Array2<S>, TrigmInfo)> {
    let mut prep = Prepared::new(a, options)?;
    if prep.params.s > 0 {
        // Sine alone has no double-angle formula
        let ((_, sin), info) = cos_sin_prepared(prep)?;
        return Ok((sin, info));
    }

    let info = prep.info();
    let params = prep.params;
    let mut sin = approximate_sin(&mut prep.table, &prep.layout.t, &params)?;
    if let Some(t) = prep.correction() {
        correct_diagonal_blocks(&mut sin, t, 0, TrigFunction::Sin);
    }

    Ok((prep.layout.restore(sin), info))
}

fn cos_sin_pipeline<S: MatrixScalar>(
    a: &Array2<S>,
    options: &TrigmOptions,
) -> Result<((Array2<S>, Array2<S>), TrigmInfo)> {
    cos_sin_prepared(Prepared::new(a, options)?)
}

fn cos_sin_prepared<S: MatrixScalar>(
    mut prep: Prepared<S>,
) -> Result<((Array2<S>, Array2<S>), TrigmInfo)> {
    let info = prep.info();
    let params = prep.params;
    let t_scaled = prep.scaled_t();

    let (mut cos, mut sin) = approximate_cos_sin(&mut prep.table, &t_scaled, &params)?;
    let correction = prep.correction();
    if let Some(t) = correction {
        correct_diagonal_blocks(&mut cos, t, params.s, TrigFunction::Cos);
        correct_diagonal_blocks(&mut sin, t, params.s, TrigFunction::Sin);
    }
    double_angle(&mut cos, Some(&mut sin), params.s, correction);

    let layout = &prep.layout;
    Ok(((layout.restore(cos), layout.restore(sin)), info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrigmError;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn max_abs_diff<S: MatrixScalar>(a: &Array2<S>, b: &Array2<S>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y).modulus())
            .fold(0.0, f64::max)
    }

    // ========================================================================
    // Small closed forms
    // ========================================================================

    #[test]
    fn test_scalar_matches_std() {
        for &x in &[0.0, 1e-9, 0.3, 1.7, -4.2, 25.0, 1e3] {
            let a = array![[x]];
            let (c, s) = cosmsinm(&a, SchurMode::None).unwrap();
            assert_relative_eq!(c[[0, 0]], f64::cos(x), epsilon = 1e-13);
            assert_relative_eq!(s[[0, 0]], f64::sin(x), epsilon = 1e-13);
        }
    }

    #[test]
    fn test_rotation_generator() {
        // cos [[0, w], [-w, 0]] = cosh(w) I
        let w = 3.5_f64;
        let a = array![[0.0, w], [-w, 0.0]];
        for mode in [SchurMode::None, SchurMode::Real, SchurMode::Complex] {
            let c = cosm(&a, mode).unwrap();
            assert_relative_eq!(c[[0, 0]], w.cosh(), max_relative = 1e-13);
            assert_relative_eq!(c[[1, 1]], w.cosh(), max_relative = 1e-13);
            assert!(c[[0, 1]].abs() < 1e-12);

            let s = sinm(&a, mode).unwrap();
            assert_relative_eq!(s[[0, 1]], w.sinh(), max_relative = 1e-13);
            assert_relative_eq!(s[[1, 0]], -w.sinh(), max_relative = 1e-13);
        }
    }

    #[test]
    fn test_jordan_block() {
        // cos [[a, 1], [0, a]] = [[cos a, -sin a], [0, cos a]]
        let x = 2.3_f64;
        let a = array![[x, 1.0], [0.0, x]];
        let (c, s) = cosmsinm(&a, SchurMode::None).unwrap();
        assert_relative_eq!(c[[0, 0]], x.cos(), epsilon = 1e-14);
        assert_relative_eq!(c[[0, 1]], -x.sin(), epsilon = 1e-14);
        assert_relative_eq!(s[[0, 1]], x.cos(), epsilon = 1e-14);
        assert_eq!(c[[1, 0]], 0.0);
    }

    // ========================================================================
    // Layout and diagnostics
    // ========================================================================

    #[test]
    fn test_info_reports_layout() {
        let upper = array![[1.0, 2.0], [0.0, 3.0]];
        let (_, info) = cosm_with_info(&upper, &TrigmOptions::default()).unwrap();
        assert_eq!(info.layout, LayoutKind::UpperTriangular);

        let lower = upper.t().to_owned();
        let (_, info) = cosm_with_info(&lower, &TrigmOptions::default()).unwrap();
        assert_eq!(info.layout, LayoutKind::LowerTriangular);

        let full = array![[1.0, 2.0], [3.0, 4.0]];
        let (_, info) = cosm_with_info(&full, &TrigmOptions::default()).unwrap();
        assert_eq!(info.layout, LayoutKind::Full);

        let opts = TrigmOptions::new().schur(SchurMode::Real);
        let (_, info) = cosm_with_info(&full, &opts).unwrap();
        assert_eq!(info.layout, LayoutKind::RealSchur);

        let opts = TrigmOptions::new().schur(SchurMode::Complex);
        let (_, info) = cosm_with_info(&full, &opts).unwrap();
        assert_eq!(info.layout, LayoutKind::ComplexSchur);
    }

    #[test]
    fn test_info_reports_scaling() {
        let small = array![[1e-10]];
        let (_, info) = sinm_with_info(&small, &TrigmOptions::default()).unwrap();
        assert_eq!((info.scaling, info.degree), (0, 1));

        let large = array![[100.0]];
        let (_, info) = sinm_with_info(&large, &TrigmOptions::default()).unwrap();
        assert!(info.scaling > 0);
    }

    #[test]
    fn test_lower_triangular_result_is_lower() {
        let a = array![[0.5, 0.0, 0.0], [1.0, -0.2, 0.0], [2.0, 0.3, 1.5]];
        let c = cosm(&a, SchurMode::None).unwrap();
        assert_eq!(c[[0, 1]], 0.0);
        assert_eq!(c[[0, 2]], 0.0);
        assert_eq!(c[[1, 2]], 0.0);
        assert_relative_eq!(c[[2, 2]], 1.5f64.cos(), epsilon = 1e-14);
    }

    // ========================================================================
    // Sine driver
    // ========================================================================

    #[test]
    fn test_sine_alone_matches_combined() {
        let a = array![[0.1, 0.4, -0.2], [0.3, 0.2, 0.1], [-0.5, 0.0, 0.3]];
        for scale in [0.01, 1.0, 40.0] {
            let a = a.mapv(|v| v * scale);
            let s = sinm(&a, SchurMode::None).unwrap();
            let (_, s2) = cosmsinm(&a, SchurMode::None).unwrap();
            assert!(max_abs_diff(&s, &s2) <= 1e-13 * (1.0 + crate::math::one_norm(&s2)));
        }
    }

    // ========================================================================
    // Edge cases and errors
    // ========================================================================

    #[test]
    fn test_huge_scalar_is_exact() {
        for &x in &[1e150, -3e200, 1.7e308] {
            let a = array![[x]];
            let (c, info) = cosm_with_info(&a, &TrigmOptions::default()).unwrap();
            assert_eq!(c[[0, 0]], x.cos());
            assert!(info.scaling > 400);

            let s = sinm(&a, SchurMode::Complex).unwrap();
            assert_eq!(s[[0, 0]], x.sin());
        }
    }

    #[test]
    fn test_huge_triangular_block() {
        let (x, y) = (1e160_f64, -2.5e160_f64);
        let a = array![[x, 1.0], [0.0, y]];
        let (c, s) = cosmsinm(&a, SchurMode::Real).unwrap();
        assert_eq!(c[[0, 0]], x.cos());
        assert_eq!(c[[1, 1]], y.cos());
        assert_eq!(s[[1, 1]], y.sin());
        assert!(c[[0, 1]].abs() <= 1e-159);
        assert!(s[[0, 1]].abs() <= 1e-159);
    }

    #[test]
    fn test_huge_dense_matrix() {
        let a = array![[1.0, 0.5, 0.25], [0.5, -2.0, 0.75], [0.25, 0.75, 3.0]].mapv(|v| v * 1e100);
        let opts = TrigmOptions::new().schur(SchurMode::Real);
        let ((c, s), info) = cosmsinm_with_info(&a, &opts).unwrap();
        assert_eq!(info.layout, LayoutKind::RealSchur);
        assert!(info.scaling > 300);
        assert!(c.iter().chain(s.iter()).all(|v| v.is_finite()));

        // Exact diagonal blocks keep cos^2 + sin^2 = I
        let residual = c.dot(&c) + s.dot(&s) - Array2::<f64>::eye(3);
        assert!(residual.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_prescaling_counts() {
        assert_eq!(prescaling(&array![[3.0, -4.0], [0.0, 1.0]]), 0);
        // 2^70 needs six halvings to reach 2^64
        assert_eq!(prescaling(&array![[2f64.powi(70)]]), 6);
        let big = array![[Complex64::new(f64::MAX, f64::MAX)]];
        assert!(prescaling(&big) > 900);
    }

    #[test]
    fn test_empty_matrix() {
        let a = Array2::<f64>::zeros((0, 0));
        let (c, s) = cosmsinm(&a, SchurMode::Real).unwrap();
        assert_eq!(c.dim(), (0, 0));
        assert_eq!(s.dim(), (0, 0));
    }

    #[test]
    fn test_zero_matrix_is_exact() {
        let a = Array2::<Complex64>::zeros((4, 4));
        let (c, s) = cosmsinm(&a, SchurMode::Complex).unwrap();
        assert_eq!(c, Array2::eye(4));
        assert_eq!(s, Array2::zeros((4, 4)));
    }

    #[test]
    fn test_errors() {
        let rect = Array2::<f64>::zeros((2, 3));
        assert_eq!(
            cosm(&rect, SchurMode::None),
            Err(TrigmError::Rectangular { rows: 2, cols: 3 })
        );

        let mut bad = Array2::<f64>::eye(2);
        bad[[0, 1]] = f64::INFINITY;
        assert_eq!(
            sinm(&bad, SchurMode::Real),
            Err(TrigmError::NotMatrix { row: 0, col: 1 })
        );
    }
}
