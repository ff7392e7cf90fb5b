//! Evaluation options
//!
//! `SchurMode` selects the similarity transform applied before evaluation;
//! `TrigmOptions` bundles it with the norm estimator settings.

use std::fmt;
use std::str::FromStr;

use crate::constants::NORMEST_COLUMNS;
use crate::error::TrigmError;

/// Similarity transform applied to a non-triangular input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchurMode {
    /// Evaluate on the full matrix
    #[default]
    None,
    /// Real Schur form (quasi-triangular with 2×2 blocks)
    Real,
    /// Complex Schur form (triangular)
    Complex,
}

impl SchurMode {
    /// Integer code used by the bindings (0, 1, 2)
    pub fn code(&self) -> u8 {
        match self {
            SchurMode::None => 0,
            SchurMode::Real => 1,
            SchurMode::Complex => 2,
        }
    }
}

impl TryFrom<i64> for SchurMode {
    type Error = TrigmError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SchurMode::None),
            1 => Ok(SchurMode::Real),
            2 => Ok(SchurMode::Complex),
            other => Err(TrigmError::InvalidSchur(other.to_string())),
        }
    }
}

impl FromStr for SchurMode {
    type Err = TrigmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "none" => Ok(SchurMode::None),
            "1" | "real" => Ok(SchurMode::Real),
            "2" | "complex" => Ok(SchurMode::Complex),
            _ => Err(TrigmError::InvalidSchur(s.to_string())),
        }
    }
}

impl fmt::Display for SchurMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchurMode::None => "none",
            SchurMode::Real => "real",
            SchurMode::Complex => "complex",
        };
        f.write_str(name)
    }
}

/// Options for a single evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrigmOptions {
    /// Similarity transform for non-triangular input
    pub schur: SchurMode,
    /// Columns used by the block 1-norm estimator (at least 1)
    pub normest_columns: usize,
}

impl Default for TrigmOptions {
    fn default() -> Self {
        Self {
            schur: SchurMode::None,
            normest_columns: NORMEST_COLUMNS,
        }
    }
}

impl TrigmOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Schur mode
    pub fn schur(mut self, schur: SchurMode) -> Self {
        self.schur = schur;
        self
    }

    /// Set the number of norm estimator columns
    pub fn normest_columns(mut self, columns: usize) -> Self {
        self.normest_columns = columns.max(1);
        self
    }
}

impl From<SchurMode> for TrigmOptions {
    fn from(schur: SchurMode) -> Self {
        Self::default().schur(schur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schur_mode_from_int() {
        assert_eq!(SchurMode::try_from(0_i64).unwrap(), SchurMode::None);
        assert_eq!(SchurMode::try_from(1_i64).unwrap(), SchurMode::Real);
        assert_eq!(SchurMode::try_from(2_i64).unwrap(), SchurMode::Complex);
        assert_eq!(
            SchurMode::try_from(3_i64),
            Err(TrigmError::InvalidSchur("3".to_string()))
        );
        assert!(SchurMode::try_from(-1_i64).is_err());
    }

    #[test]
    fn test_schur_mode_from_str() {
        assert_eq!("none".parse::<SchurMode>().unwrap(), SchurMode::None);
        assert_eq!("Real".parse::<SchurMode>().unwrap(), SchurMode::Real);
        assert_eq!(" COMPLEX ".parse::<SchurMode>().unwrap(), SchurMode::Complex);
        assert_eq!("2".parse::<SchurMode>().unwrap(), SchurMode::Complex);
        assert!("qz".parse::<SchurMode>().is_err());
    }

    #[test]
    fn test_schur_mode_round_trip_code() {
        for mode in [SchurMode::None, SchurMode::Real, SchurMode::Complex] {
            assert_eq!(SchurMode::try_from(mode.code() as i64).unwrap(), mode);
        }
    }

    #[test]
    fn test_options_builder() {
        let opts = TrigmOptions::new().schur(SchurMode::Real).normest_columns(0);
        assert_eq!(opts.schur, SchurMode::Real);
        assert_eq!(opts.normest_columns, 1);
        assert_eq!(TrigmOptions::default().normest_columns, NORMEST_COLUMNS);
    }
}
