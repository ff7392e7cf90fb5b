//! Choice of scaling count and approximant degree
//!
//! Walks the degree ladder with progressively sharper bounds on the
//! backward error and falls back to scaling when even the top degree is
//! not accurate enough. The quantity compared against `theta_m` for a
//! given degree only uses powers `B^p` whose `d_{2p}` may bound the
//! error series of that degree.

use super::coefficients::theta;
use super::powers::PowerNorms;
use crate::constants::MAX_SCALING;
use crate::error::{Result, TrigmError};

/// Scaling count `s` and approximant degree `m`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSet {
    /// Number of halvings (and later double-angle steps)
    pub s: u32,
    /// Degree in `B = A^2` of the approximant
    pub m: usize,
}

impl ParameterSet {
    const fn new(s: u32, m: usize) -> Self {
        Self { s, m }
    }
}

fn rejected(norm: f64) -> TrigmError {
    TrigmError::ParameterSelection { norm }
}

/// First degree of `degrees` whose threshold admits `eta`
fn first_admitted(eta: f64, degrees: &[usize]) -> Option<usize> {
    degrees.iter().copied().find(|&m| eta <= theta(m))
}

/// Select `(s, m)` for the working matrix whose power norms `norms` reports
pub(crate) fn select_parameters<N: PowerNorms>(norms: &mut N) -> Result<ParameterSet> {
    let d2 = norms.exact_root(1);
    if !d2.is_finite() {
        return Err(rejected(d2));
    }
    if let Some(m) = first_admitted(d2, &[1, 2]) {
        return Ok(ParameterSet::new(0, m));
    }

    let d4 = norms.exact_root(2);
    let d6 = norms.exact_root(3);
    let a2 = d4.max(d6);
    let eta2 = d2.min(a2);
    if let Some(m) = first_admitted(eta2, &[3, 4]) {
        return Ok(ParameterSet::new(0, m));
    }

    let d8 = norms.estimated_root(4);
    let a3 = d6.max(d8);
    let eta3 = eta2.min(a3);
    if let Some(m) = first_admitted(eta3, &[6, 8, 10]) {
        return Ok(ParameterSet::new(0, m));
    }

    let d10 = norms.estimated_root(5);
    let a4 = d8.max(d10);
    let eta4 = eta3.min(a4);
    if let Some(m) = first_admitted(eta4, &[12, 15, 18]) {
        return Ok(ParameterSet::new(0, m));
    }

    let d12 = norms.estimated_root(6);
    let a5 = d10.max(d12);
    let eta5 = eta4.min(a5);
    if eta5 <= theta(21) {
        return Ok(ParameterSet::new(0, 21));
    }

    let a345 = a3.min(a4).min(a5);
    if !a345.is_finite() {
        return Err(rejected(a345));
    }
    let theta21 = theta(21);
    let guess = (a345 / theta21).log2().ceil().max(1.0);
    if guess > MAX_SCALING as f64 {
        return Err(rejected(a345));
    }
    let mut s = guess as u32;
    while a345 * 0.5f64.powi(s as i32) > theta21 {
        s += 1;
        if s > MAX_SCALING {
            return Err(rejected(a345));
        }
    }

    // The scaled problem may be accurate at a cheaper degree
    let scale = 0.5f64.powi(s as i32);
    let m = first_admitted(eta3 * scale, &[8, 10])
        .or_else(|| first_admitted(eta4 * scale, &[12, 15]))
        .unwrap_or(21);

    Ok(ParameterSet::new(s, m))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Injected `d_{2j}` values, recording which ones were requested
    struct Fixed {
        d: [f64; 6],
        exact: Vec<usize>,
        estimated: Vec<usize>,
    }

    impl Fixed {
        fn new(d: [f64; 6]) -> Self {
            Self { d, exact: Vec::new(), estimated: Vec::new() }
        }

        /// Every `d_{2j}` equal, as for a normal matrix with one dominant eigenvalue
        fn flat(x: f64) -> Self {
            Self::new([x; 6])
        }
    }

    impl PowerNorms for Fixed {
        fn exact_root(&mut self, j: usize) -> f64 {
            self.exact.push(j);
            self.d[j - 1]
        }

        fn estimated_root(&mut self, j: usize) -> f64 {
            self.estimated.push(j);
            self.d[j - 1]
        }
    }

    fn select(d: f64) -> ParameterSet {
        select_parameters(&mut Fixed::flat(d)).unwrap()
    }

    // ========================================================================
    // Ladder boundaries
    // ========================================================================

    #[test]
    fn test_zero_matrix_uses_degree_one() {
        let mut norms = Fixed::flat(0.0);
        let p = select_parameters(&mut norms).unwrap();
        assert_eq!(p, ParameterSet { s: 0, m: 1 });
        // Nothing beyond B itself was measured
        assert_eq!(norms.exact, vec![1]);
        assert!(norms.estimated.is_empty());
    }

    #[test]
    fn test_threshold_boundaries() {
        let ladder = [1, 2, 3, 4, 6, 8, 10, 12, 15, 18, 21];
        for (i, &m) in ladder.iter().enumerate() {
            assert_eq!(select(theta(m)), ParameterSet { s: 0, m }, "at theta_{}", m);
            let above = theta(m) * (1.0 + 1e-12);
            if let Some(&next) = ladder.get(i + 1) {
                assert_eq!(select(above).m, next, "just above theta_{}", m);
                assert_eq!(select(above).s, 0);
            } else {
                assert_eq!(select(above).s, 1);
            }
        }
    }

    #[test]
    fn test_small_d2_short_circuits_large_powers() {
        // d2 admits degree 3 even though higher powers look large
        let mut norms = Fixed::new([0.01, 5.0, 5.0, 5.0, 5.0, 5.0]);
        let p = select_parameters(&mut norms).unwrap();
        assert_eq!(p.m, 3);
        assert_eq!(norms.exact, vec![1, 2, 3]);
        assert!(norms.estimated.is_empty());
    }

    #[test]
    fn test_decaying_powers_avoid_scaling() {
        // Non-normal matrix: ||B|| large but powers decay
        let mut norms = Fixed::new([50.0, 40.0, 9.0, 8.0, 7.0, 6.0]);
        let p = select_parameters(&mut norms).unwrap();
        // eta = min(50, 40, max(9, 8), max(8, 7)) = 8 <= theta_18
        assert_eq!(p, ParameterSet { s: 0, m: 18 });
        assert_eq!(norms.estimated, vec![4, 5]);
    }

    // ========================================================================
    // Scaling
    // ========================================================================

    #[test]
    fn test_scaling_count() {
        // 2^5 theta_21 < 500 <= 2^6 theta_21
        let p = select(500.0);
        assert_eq!(p.s, 6);
        assert!(500.0 / 64.0 <= theta(21));
        assert!(500.0 / 32.0 > theta(21));
    }

    #[test]
    fn test_scaled_degree_can_shrink() {
        // One halving brings the bound under theta_15
        let p = select(theta(21) * 1.01);
        assert_eq!(p, ParameterSet { s: 1, m: 15 });
    }

    #[test]
    fn test_scaled_degree_uses_sharpest_bound() {
        // a345 = 200 forces s = 4; d2 = 14 then admits degree 8
        let mut norms = Fixed::new([14.0, 200.0, 200.0, 200.0, 200.0, 200.0]);
        let p = select_parameters(&mut norms).unwrap();
        assert_eq!(p, ParameterSet { s: 4, m: 8 });

        // Same bound everywhere leaves the top degree
        let mut norms = Fixed::new([100.0, 20.0, 20.0, 20.0, 20.0, 20.0]);
        let p = select_parameters(&mut norms).unwrap();
        assert_eq!(p, ParameterSet { s: 1, m: 21 });
    }

    // ========================================================================
    // Failures
    // ========================================================================

    #[test]
    fn test_non_finite_norm_is_rejected() {
        let err = select_parameters(&mut Fixed::flat(f64::INFINITY)).unwrap_err();
        assert!(matches!(err, TrigmError::ParameterSelection { .. }));

        let err = select_parameters(&mut Fixed::flat(f64::NAN)).unwrap_err();
        assert!(matches!(err, TrigmError::ParameterSelection { .. }));
    }

    #[test]
    fn test_non_finite_estimate_is_rejected() {
        let mut norms = Fixed::new([20.0, 20.0, 20.0, f64::INFINITY, f64::INFINITY, f64::INFINITY]);
        let err = select_parameters(&mut norms).unwrap_err();
        assert!(matches!(err, TrigmError::ParameterSelection { .. }));
    }
}
