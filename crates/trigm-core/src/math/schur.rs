//! Schur decomposition by Hessenberg reduction and shifted QR iteration
//!
//! Real matrices use the Francis double-shift iteration and end in real
//! quasi-triangular form. Complex matrices use single-shift Givens sweeps
//! and end upper triangular. Both deflate on negligible subdiagonal entries
//! and write the deflated entries as exact zeros, so the block structure can
//! be read off the subdiagonal afterwards.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{Result, TrigmError};
use crate::scalar::MatrixScalar;

// ============================================================================
// Hessenberg reduction
// ============================================================================

/// Reduce `h` to upper Hessenberg form, accumulating the reflectors into `q`
///
/// On entry `q` holds the basis to update (usually the identity); on exit
/// `q_in * a = q_out * h` with `h` Hessenberg and the entries below its
/// subdiagonal exactly zero.
pub(crate) fn hessenberg<S: MatrixScalar>(h: &mut Array2<S>, q: &mut Array2<S>) {
    let n = h.nrows();

    for m in 1..n.saturating_sub(1) {
        let scale: f64 = (m..n).map(|i| h[[i, m - 1]].modulus()).sum();
        if scale == 0.0 {
            continue;
        }

        let inv = S::from_real(1.0 / scale);
        let mut u: Vec<S> = (m..n).map(|i| h[[i, m - 1]] * inv).collect();
        let alpha = u.iter().map(|x| x.modulus().powi(2)).sum::<f64>().sqrt();
        let lead = u[0];
        let phase = if lead.modulus() == 0.0 {
            S::one()
        } else {
            lead * S::from_real(1.0 / lead.modulus())
        };
        u[0] = lead + phase * S::from_real(alpha);
        // u* u / 2
        let half = S::from_real(alpha * (alpha + lead.modulus()));

        // H <- P H on rows m..n
        for j in m..n {
            let mut f = S::zero();
            for (k, &uk) in u.iter().enumerate() {
                f += uk.conj() * h[[m + k, j]];
            }
            f = f / half;
            for (k, &uk) in u.iter().enumerate() {
                h[[m + k, j]] -= uk * f;
            }
        }

        // H <- H P and Q <- Q P on columns m..n
        for mat in [&mut *h, &mut *q] {
            for i in 0..n {
                let mut f = S::zero();
                for (k, &uk) in u.iter().enumerate() {
                    f += mat[[i, m + k]] * uk;
                }
                f = f / half;
                for (k, &uk) in u.iter().enumerate() {
                    mat[[i, m + k]] -= f * uk.conj();
                }
            }
        }

        h[[m, m - 1]] = S::zero() - phase * S::from_real(alpha * scale);
        for i in (m + 1)..n {
            h[[i, m - 1]] = S::zero();
        }
    }
}

/// Sum of moduli over the Hessenberg band
fn band_norm<S: MatrixScalar>(h: &Array2<S>) -> f64 {
    let n = h.nrows();
    (0..n)
        .map(|i| (i.saturating_sub(1)..n).map(|j| h[[i, j]].modulus()).sum::<f64>())
        .sum()
}

/// Index of the top of the unreduced block ending at row `hi`
///
/// The subdiagonal entry above it, if any, is negligible against its
/// diagonal neighbours and is set to zero.
fn split_point<S: MatrixScalar>(h: &mut Array2<S>, hi: usize, norm: f64) -> usize {
    let mut l = hi;
    while l > 0 {
        let mut local = h[[l - 1, l - 1]].modulus() + h[[l, l]].modulus();
        if local == 0.0 {
            local = norm;
        }
        if h[[l, l - 1]].modulus() <= f64::EPSILON * local {
            h[[l, l - 1]] = S::zero();
            break;
        }
        l -= 1;
    }
    l
}

// ============================================================================
// Real quasi-triangular form
// ============================================================================

/// Apply the plane rotation `[[c, s], [-s, c]]` to rows `r` and `r + 1`
fn rotate_rows(mat: &mut Array2<f64>, r: usize, cols: std::ops::Range<usize>, c: f64, s: f64) {
    for j in cols {
        let (a, b) = (mat[[r, j]], mat[[r + 1, j]]);
        mat[[r, j]] = c * a + s * b;
        mat[[r + 1, j]] = c * b - s * a;
    }
}

/// Apply the transposed rotation to columns `k` and `k + 1`
fn rotate_cols(mat: &mut Array2<f64>, k: usize, rows: std::ops::Range<usize>, c: f64, s: f64) {
    for i in rows {
        let (a, b) = (mat[[i, k]], mat[[i, k + 1]]);
        mat[[i, k]] = c * a + s * b;
        mat[[i, k + 1]] = c * b - s * a;
    }
}

/// Francis double-shift QR on a real Hessenberg matrix
///
/// Leaves `h` quasi-upper-triangular: 2x2 diagonal blocks remain only for
/// complex conjugate eigenvalue pairs, every other subdiagonal entry is zero.
pub(crate) fn real_schur_form(h: &mut Array2<f64>, q: &mut Array2<f64>, budget: usize) -> Result<()> {
    let size = h.nrows();
    let norm = band_norm(h);
    let eps = f64::EPSILON;

    let mut exshift = 0.0;
    let mut iter = 0usize;
    let mut sweeps = 0usize;
    let mut active = size;

    while active > 0 {
        let n = active - 1;
        let l = split_point(h, n, norm);

        if l == n {
            h[[n, n]] += exshift;
            active -= 1;
            iter = 0;
            continue;
        }

        if l + 1 == n {
            let w = h[[n, n - 1]] * h[[n - 1, n]];
            let p = 0.5 * (h[[n - 1, n - 1]] - h[[n, n]]);
            let disc = p * p + w;
            h[[n, n]] += exshift;
            h[[n - 1, n - 1]] += exshift;

            if disc >= 0.0 {
                // Real pair: rotate the block to triangular form
                let root = disc.sqrt();
                let z = if p >= 0.0 { p + root } else { p - root };
                let x = h[[n, n - 1]];
                let r = x.hypot(z);
                let (c, s) = (z / r, x / r);
                rotate_rows(h, n - 1, (n - 1)..size, c, s);
                rotate_cols(h, n - 1, 0..(n + 1), c, s);
                rotate_cols(q, n - 1, 0..size, c, s);
                h[[n, n - 1]] = 0.0;
            }
            active -= 2;
            iter = 0;
            continue;
        }

        sweeps += 1;
        if sweeps > budget {
            return Err(TrigmError::SchurFailed { n: size });
        }

        // Shift from the trailing 2x2 block
        let mut x = h[[n, n]];
        let mut y = h[[n - 1, n - 1]];
        let mut w = h[[n, n - 1]] * h[[n - 1, n]];

        if iter == 10 {
            exshift += x;
            for i in 0..=n {
                h[[i, i]] -= x;
            }
            let s = h[[n, n - 1]].abs() + h[[n - 1, n - 2]].abs();
            x = 0.75 * s;
            y = x;
            w = -0.4375 * s * s;
        }

        if iter == 30 {
            let half = 0.5 * (y - x);
            let disc = half * half + w;
            if disc > 0.0 {
                let root = if y < x { -disc.sqrt() } else { disc.sqrt() };
                let s = x - w / (half + root);
                for i in 0..=n {
                    h[[i, i]] -= s;
                }
                exshift += s;
                x = 0.964;
                y = x;
                w = x;
            }
        }
        iter += 1;

        // Start the sweep below two consecutive small subdiagonal entries
        let (m, mut p, mut qq, mut r) = {
            let mut m = n - 2;
            loop {
                let z = h[[m, m]];
                let rr = x - z;
                let ss = y - z;
                let p = (rr * ss - w) / h[[m + 1, m]] + h[[m, m + 1]];
                let qv = h[[m + 1, m + 1]] - z - rr - ss;
                let r = h[[m + 2, m + 1]];
                let s = p.abs() + qv.abs() + r.abs();
                let (p, qv, r) = (p / s, qv / s, r / s);
                if m == l {
                    break (m, p, qv, r);
                }
                let lhs = h[[m, m - 1]].abs() * (qv.abs() + r.abs());
                let rhs = eps * p.abs() * (h[[m - 1, m - 1]].abs() + z.abs() + h[[m + 1, m + 1]].abs());
                if lhs < rhs {
                    break (m, p, qv, r);
                }
                m -= 1;
            }
        };

        for i in (m + 2)..=n {
            h[[i, i - 2]] = 0.0;
            if i > m + 2 {
                h[[i, i - 3]] = 0.0;
            }
        }

        for k in m..n {
            let notlast = k + 1 != n;
            let mut scale = 1.0;
            if k != m {
                p = h[[k, k - 1]];
                qq = h[[k + 1, k - 1]];
                r = if notlast { h[[k + 2, k - 1]] } else { 0.0 };
                scale = p.abs() + qq.abs() + r.abs();
                if scale == 0.0 {
                    continue;
                }
                p /= scale;
                qq /= scale;
                r /= scale;
            }

            let mut s = (p * p + qq * qq + r * r).sqrt();
            if p < 0.0 {
                s = -s;
            }
            if s == 0.0 {
                continue;
            }

            if k != m {
                h[[k, k - 1]] = -s * scale;
            } else if l != m {
                h[[k, k - 1]] = -h[[k, k - 1]];
            }
            p += s;
            let (vx, vy, vz) = (p / s, qq / s, r / s);
            qq /= p;
            r /= p;

            for j in k..size {
                let mut t = h[[k, j]] + qq * h[[k + 1, j]];
                if notlast {
                    t += r * h[[k + 2, j]];
                    h[[k + 2, j]] -= t * vz;
                }
                h[[k, j]] -= t * vx;
                h[[k + 1, j]] -= t * vy;
            }

            let last_row = n.min(k + 3);
            for (mat, rows) in [(&mut *h, last_row + 1), (&mut *q, size)] {
                for i in 0..rows {
                    let mut t = vx * mat[[i, k]] + vy * mat[[i, k + 1]];
                    if notlast {
                        t += vz * mat[[i, k + 2]];
                        mat[[i, k + 2]] -= t * r;
                    }
                    mat[[i, k]] -= t;
                    mat[[i, k + 1]] -= t * qq;
                }
            }
        }
    }

    // Bulge remnants below the first subdiagonal are logically zero
    for i in 2..size {
        for j in 0..(i - 1) {
            h[[i, j]] = 0.0;
        }
    }
    Ok(())
}

// ============================================================================
// Complex triangular form
// ============================================================================

/// Rotation `[[c, s], [-conj(s), c]]` with real `c` mapping `(x, y)` to `(r, 0)`
fn givens(x: Complex64, y: Complex64) -> (f64, Complex64) {
    let (ax, ay) = (x.norm(), y.norm());
    if ay == 0.0 {
        return (1.0, Complex64::new(0.0, 0.0));
    }
    if ax == 0.0 {
        return (0.0, y.conj() / ay);
    }
    let r = ax.hypot(ay);
    (ax / r, (x / ax) * y.conj() / r)
}

/// Eigenvalue of `[[a, b], [c, d]]` closest to `d`
fn wilkinson_shift(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Complex64 {
    let delta = (a - d) * 0.5;
    let bc = b * c;
    let mut root = (delta * delta + bc).sqrt();
    if (delta + root).norm() < (delta - root).norm() {
        root = -root;
    }
    let denom = delta + root;
    if denom.norm() == 0.0 {
        d
    } else {
        d - bc / denom
    }
}

/// Single-shift QR on a complex Hessenberg matrix, leaving `h` upper triangular
pub(crate) fn complex_schur_form(
    h: &mut Array2<Complex64>,
    q: &mut Array2<Complex64>,
    budget: usize,
) -> Result<()> {
    let size = h.nrows();
    let norm = band_norm(h);
    let zero = Complex64::new(0.0, 0.0);

    let mut iter = 0usize;
    let mut sweeps = 0usize;
    let mut active = size;

    while active > 1 {
        let hi = active - 1;
        let l = split_point(h, hi, norm);
        if l == hi {
            active -= 1;
            iter = 0;
            continue;
        }

        sweeps += 1;
        if sweeps > budget {
            return Err(TrigmError::SchurFailed { n: size });
        }
        iter += 1;

        let shift = if iter % 10 == 0 {
            h[[hi, hi]] + 0.75 * h[[hi, hi - 1]].norm()
        } else {
            wilkinson_shift(h[[hi - 1, hi - 1]], h[[hi - 1, hi]], h[[hi, hi - 1]], h[[hi, hi]])
        };

        let mut x = h[[l, l]] - shift;
        let mut y = h[[l + 1, l]];
        for k in l..hi {
            let (c, s) = givens(x, y);
            let first = if k > l { k - 1 } else { l };

            for j in first..size {
                let (a, b) = (h[[k, j]], h[[k + 1, j]]);
                h[[k, j]] = a * c + s * b;
                h[[k + 1, j]] = b * c - s.conj() * a;
            }
            if k > l {
                h[[k + 1, k - 1]] = zero;
            }

            let last_row = hi.min(k + 2);
            for (mat, rows) in [(&mut *h, last_row + 1), (&mut *q, size)] {
                for i in 0..rows {
                    let (a, b) = (mat[[i, k]], mat[[i, k + 1]]);
                    mat[[i, k]] = a * c + b * s.conj();
                    mat[[i, k + 1]] = b * c - a * s;
                }
            }

            if k + 1 < hi {
                x = h[[k + 1, k]];
                y = h[[k + 2, k]];
            }
        }
    }

    for i in 1..size {
        for j in 0..i {
            h[[i, j]] = zero;
        }
    }
    Ok(())
}
