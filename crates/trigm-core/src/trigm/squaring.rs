//! Double-angle recovery
//!
//! Undoes the scaling `T -> T 2^-s` with `cos 2X = 2 cos^2 X - I` and,
//! when the sine is carried along, `sin 2X = 2 sin X cos X`.

use ndarray::Array2;

use super::blocks::{correct_diagonal_blocks, TrigFunction};
use crate::math::{scale_in_place, sub_identity_in_place};
use crate::scalar::MatrixScalar;

/// Apply `s` double-angle steps to `cos` (and `sin` if present)
///
/// `correction` is the (quasi-)triangular working matrix when diagonal
/// blocks should be recomputed after every step; the blocks are written
/// for depth `s - step`, so the final pass uses the unscaled matrix.
pub(crate) fn double_angle<S: MatrixScalar>(
    cos: &mut Array2<S>,
    mut sin: Option<&mut Array2<S>>,
    s: u32,
    correction: Option<&Array2<S>>,
) {
    for step in 1..=s {
        if let Some(sin) = sin.as_deref_mut() {
            let mut next = sin.dot(&*cos);
            scale_in_place(&mut next, 2.0);
            *sin = next;
        }

        let mut next = cos.dot(&*cos);
        scale_in_place(&mut next, 2.0);
        sub_identity_in_place(&mut next);
        *cos = next;

        let depth = s - step;
        log::trace!("double-angle step {}/{}", step, s);
        if let Some(t) = correction {
            correct_diagonal_blocks(cos, t, depth, TrigFunction::Cos);
            if let Some(sin) = sin.as_deref_mut() {
                correct_diagonal_blocks(sin, t, depth, TrigFunction::Sin);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_scalar_recovery() {
        let x = 3.0_f64;
        let s = 4;
        let xs = x / 16.0;
        let mut c = array![[xs.cos()]];
        let mut sn = array![[xs.sin()]];
        double_angle(&mut c, Some(&mut sn), s, None);
        assert_relative_eq!(c[[0, 0]], x.cos(), epsilon = 1e-13);
        assert_relative_eq!(sn[[0, 0]], x.sin(), epsilon = 1e-13);
    }

    #[test]
    fn test_zero_steps_is_identity() {
        let mut c = array![[0.5, 0.1], [0.0, 0.2]];
        let before = c.clone();
        double_angle(&mut c, None, 0, None);
        assert_eq!(c, before);
    }

    #[test]
    fn test_correction_writes_unscaled_blocks_last() {
        let t = array![[2.0, 1.0], [0.0, -1.0]];
        // Start from the exact values at depth 3, perturbed on the diagonal
        let mut c = Array2::<f64>::zeros((2, 2));
        let mut sn = Array2::<f64>::zeros((2, 2));
        correct_diagonal_blocks(&mut c, &t, 3, TrigFunction::Cos);
        correct_diagonal_blocks(&mut sn, &t, 3, TrigFunction::Sin);
        c[[0, 0]] += 1e-6;

        double_angle(&mut c, Some(&mut sn), 3, Some(&t));
        assert_eq!(c[[0, 0]], 2.0f64.cos());
        assert_relative_eq!(c[[0, 1]], (2.0f64.cos() - 1.0f64.cos()) / 3.0, epsilon = 1e-14);
        assert_relative_eq!(sn[[1, 1]], -(1.0f64.sin()), epsilon = 1e-14);
    }
}
