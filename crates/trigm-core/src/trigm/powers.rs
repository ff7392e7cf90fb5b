//! Cached powers of `B = T^2`
//!
//! Powers are formed on demand and reused by both the parameter selector
//! and the approximant evaluator. Norms of powers that are not worth
//! forming are estimated from products with the cached ones.

use ndarray::Array2;

use crate::constants::NORMEST_EXACT_ORDER;
use crate::math::normest::{normest1, one_norm, LinearOperator};
use crate::math::scale_in_place;
use crate::scalar::MatrixScalar;

/// Source of the quantities `d_{2j} = ||B^j||_1^(1/(2j))`
pub(crate) trait PowerNorms {
    /// `d_{2j}` with `B^j` materialized
    fn exact_root(&mut self, j: usize) -> f64;
    /// `d_{2j}`, estimated unless `B^j` is already cached
    fn estimated_root(&mut self, j: usize) -> f64;
}

/// Lazily filled table `B, B^2, ..., B^k`
#[derive(Debug, Clone)]
pub(crate) struct PowerTable<S: MatrixScalar> {
    powers: Vec<Array2<S>>,
    normest_columns: usize,
}

impl<S: MatrixScalar> PowerTable<S> {
    /// Start the table from the working matrix `T`
    pub fn new(t: &Array2<S>, normest_columns: usize) -> Self {
        Self {
            powers: vec![t.dot(t)],
            normest_columns,
        }
    }

    /// Matrix order
    #[inline]
    pub fn dim(&self) -> usize {
        self.powers[0].nrows()
    }

    /// Highest power currently cached
    #[inline]
    pub fn cached(&self) -> usize {
        self.powers.len()
    }

    /// Form powers up to `B^k`
    fn fill(&mut self, k: usize) {
        while self.powers.len() < k {
            let next = self.powers[self.powers.len() - 1].dot(&self.powers[0]);
            self.powers.push(next);
        }
    }

    /// `[B, B^2, ..., B^k]`, forming missing powers
    pub fn powers(&mut self, k: usize) -> &[Array2<S>] {
        self.fill(k);
        &self.powers[..k]
    }

    /// Rescale for a working matrix `T 2^-s`: `B^j` picks up `4^(-s j)`
    ///
    /// The factor is applied in steps of `2^-s` so intermediate factors
    /// never underflow before the entries do.
    pub fn scaled(mut self, s: u32) -> Self {
        if s == 0 {
            return self;
        }
        let half_s = 0.5f64.powi(s as i32);
        for (idx, p) in self.powers.iter_mut().enumerate() {
            for _ in 0..2 * (idx + 1) {
                scale_in_place(p, half_s);
            }
        }
        self
    }

    fn root_of(norm: f64, j: usize) -> f64 {
        norm.powf(1.0 / (2 * j) as f64)
    }
}

impl<S: MatrixScalar> PowerNorms for PowerTable<S> {
    fn exact_root(&mut self, j: usize) -> f64 {
        self.fill(j);
        let d = Self::root_of(one_norm(&self.powers[j - 1]), j);
        log::trace!("d{} = {:e} (exact)", 2 * j, d);
        d
    }

    fn estimated_root(&mut self, j: usize) -> f64 {
        if j <= self.cached() || self.dim() <= NORMEST_EXACT_ORDER {
            return self.exact_root(j);
        }
        let op = PowerOperator::new(&self.powers, j);
        let d = Self::root_of(normest1(&op, self.normest_columns), j);
        log::trace!("d{} = {:e} (estimated)", 2 * j, d);
        d
    }
}

// ============================================================================
// Implicit power operator
// ============================================================================

/// `B^p` applied as a product of cached powers, largest first
struct PowerOperator<'a, S: MatrixScalar> {
    cached: &'a [Array2<S>],
    /// Exponents (into `cached`) applied right to left
    factors: Vec<usize>,
}

impl<'a, S: MatrixScalar> PowerOperator<'a, S> {
    fn new(cached: &'a [Array2<S>], p: usize) -> Self {
        let top = cached.len();
        let mut factors = vec![top; p / top];
        if p % top != 0 {
            factors.push(p % top);
        }
        Self { cached, factors }
    }
}

impl<S: MatrixScalar> LinearOperator<S> for PowerOperator<'_, S> {
    fn dim(&self) -> usize {
        self.cached[0].nrows()
    }

    fn apply(&self, x: &Array2<S>) -> Array2<S> {
        self.factors
            .iter()
            .fold(x.clone(), |acc, &j| self.cached[j - 1].dot(&acc))
    }

    fn apply_adjoint(&self, x: &Array2<S>) -> Array2<S> {
        // (B^j)* X = conj((B^j)^T conj(X))
        let y = self.factors.iter().rev().fold(x.mapv(|v| v.conj()), |acc, &j| {
            self.cached[j - 1].t().dot(&acc)
        });
        y.mapv(|v| v.conj())
    }
}
