//! Numerical constants and limits
//!
//! Tolerances and iteration budgets shared by the factorization bridge,
//! the norm estimator and the parameter selector.

/// Schur iteration budget per matrix row.
/// The QR sweep gives up (and reports `SchurFailed`) after `n * SCHUR_ITERATIONS_PER_ROW` steps.
pub const SCHUR_ITERATIONS_PER_ROW: usize = 100;

/// Default number of columns in the block 1-norm estimator.
pub const NORMEST_COLUMNS: usize = 2;

/// Maximum number of sweeps of the block 1-norm estimator.
pub const NORMEST_MAX_ITER: usize = 5;

/// Matrices up to this order have their powers formed and measured exactly.
pub const NORMEST_EXACT_ORDER: usize = 4;

/// Working matrices with `||T||_1` above `2^PRESCALE_EXPONENT` are halved
/// before any power of `T^2` is formed, so every power the parameter
/// selector and the evaluator use stays finite.
pub const PRESCALE_EXPONENT: i32 = 64;

/// Largest admissible scaling count.
/// Halving a finite double more often than this flushes it to zero.
pub const MAX_SCALING: u32 = 1100;
