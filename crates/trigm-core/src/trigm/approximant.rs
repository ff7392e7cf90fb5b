//! Rational approximant evaluation
//!
//! Polynomials in `B` are evaluated with the Paterson-Stockmeyer scheme
//! over the cached powers `B, ..., B^k`, then the shared denominator is
//! factorized once and applied to every requested numerator.

use ndarray::Array2;

use super::coefficients::{degree_table, DegreeTable};
use super::params::ParameterSet;
use super::powers::PowerTable;
use crate::error::{Result, TrigmError};
use crate::math::linalg::LuSolver;
use crate::scalar::MatrixScalar;

/// `sum_g (B^k)^g q_g(B)` by nested multiplication with `B^k`
///
/// `coeffs` are in ascending powers of `B` and `powers` holds
/// `[B, ..., B^k]`. Only `deg / k` (or one less) products are made.
pub(crate) fn paterson_stockmeyer<S: MatrixScalar>(
    coeffs: &[f64],
    powers: &[Array2<S>],
) -> Array2<S> {
    let n = powers[0].nrows();
    let k = powers.len();
    let deg = coeffs.len() - 1;

    // q_g(B) = sum_{i<k} c_{gk+i} B^i
    let group = |g: usize| -> Array2<S> {
        let base = g * k;
        let mut q = Array2::from_diag_elem(n, S::from_real(coeffs[base]));
        for i in 1..k {
            match coeffs.get(base + i) {
                Some(&c) => q.scaled_add(S::from_real(c), &powers[i - 1]),
                None => break,
            }
        }
        q
    };

    let top = deg / k;
    if top == 0 {
        return group(0);
    }

    // Leading group: when k divides deg, c_deg B^k joins the group below
    let (mut acc, mut g) = if deg % k == 0 {
        let mut q = group(top - 1);
        q.scaled_add(S::from_real(coeffs[deg]), &powers[k - 1]);
        (q, top - 1)
    } else {
        (group(top), top)
    };

    let bk = &powers[k - 1];
    while g > 0 {
        g -= 1;
        let mut next = bk.dot(&acc);
        next += &group(g);
        acc = next;
    }
    acc
}

fn table_for(params: &ParameterSet) -> Result<&'static DegreeTable> {
    degree_table(params.m).ok_or(TrigmError::UnsupportedDegree { degree: params.m })
}

fn solve<S: MatrixScalar>(solver: &LuSolver<S>, rhs: &Array2<S>, degree: usize) -> Result<Array2<S>> {
    solver
        .solve(rhs)
        .ok_or(TrigmError::SingularDenominator { degree })
}

/// Factorized denominator plus the powers it was built from
struct Prepared<'a, S: MatrixScalar> {
    table: &'static DegreeTable,
    powers: &'a [Array2<S>],
    solver: LuSolver<S>,
}

impl<'a, S: MatrixScalar> Prepared<'a, S> {
    fn new(table: &'a mut PowerTable<S>, params: &ParameterSet) -> Result<Self> {
        let deg = table_for(params)?;
        let powers = table.powers(deg.block);
        let den = paterson_stockmeyer(deg.den, powers);
        let solver = LuSolver::new(&den).ok_or(TrigmError::SingularDenominator {
            degree: deg.degree,
        })?;
        Ok(Self { table: deg, powers, solver })
    }

    fn cos(&self) -> Result<Array2<S>> {
        let num = paterson_stockmeyer(self.table.cos_num, self.powers);
        solve(&self.solver, &num, self.table.degree)
    }

    fn sin(&self, t_scaled: &Array2<S>) -> Result<Array2<S>> {
        let num = t_scaled.dot(&paterson_stockmeyer(self.table.sin_num, self.powers));
        solve(&self.solver, &num, self.table.degree)
    }
}

/// Cosine approximant of the scaled working matrix
pub(crate) fn approximate_cos<S: MatrixScalar>(
    table: &mut PowerTable<S>,
    params: &ParameterSet,
) -> Result<Array2<S>> {
    Prepared::new(table, params)?.cos()
}

/// Sine approximant; `t_scaled` is the working matrix times `2^-s`
pub(crate) fn approximate_sin<S: MatrixScalar>(
    table: &mut PowerTable<S>,
    t_scaled: &Array2<S>,
    params: &ParameterSet,
) -> Result<Array2<S>> {
    Prepared::new(table, params)?.sin(t_scaled)
}

/// Both approximants sharing one factorization of the denominator
pub(crate) fn approximate_cos_sin<S: MatrixScalar>(
    table: &mut PowerTable<S>,
    t_scaled: &Array2<S>,
    params: &ParameterSet,
) -> Result<(Array2<S>, Array2<S>)> {
    let prepared = Prepared::new(table, params)?;
    Ok((prepared.cos()?, prepared.sin(t_scaled)?))
}
