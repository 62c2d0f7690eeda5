//! Threshold configuration for quotation pair inference

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Default threshold constants
pub mod defaults {
    /// Share of a symmetric mark's occurrences that start+end positions must explain
    pub const SYMMETRIC_COVERAGE: f64 = 0.9;

    /// Lower bound of the start/end balance ratio
    pub const BALANCE_MIN: f64 = 0.8;

    /// Upper bound of the start/end balance ratio
    pub const BALANCE_MAX: f64 = 1.4;

    /// Share of an opener's occurrences that must be token-initial
    pub const OPENER_COVERAGE: f64 = 0.8;

    /// Minimum share of a closer's occurrences that must be token-final
    pub const CLOSER_MIN_COVERAGE: f64 = 0.3;

    /// Share of a closer's occurrences explained by token-final plus mid-word use
    pub const CLOSER_COVERAGE: f64 = 0.9;

    /// Share of both characters' occurrences that balanced spans must explain
    pub const PAIRING_COVERAGE: f64 = 0.8;

    /// Line count above which analysis is split across workers
    pub const PARALLEL_THRESHOLD_LINES: usize = 50_000;
}

/// Empirical thresholds applied when finalizing quotation pairs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceThresholds {
    /// See [`defaults::SYMMETRIC_COVERAGE`]
    pub symmetric_coverage: f64,
    /// See [`defaults::BALANCE_MIN`]
    pub balance_min: f64,
    /// See [`defaults::BALANCE_MAX`]
    pub balance_max: f64,
    /// See [`defaults::OPENER_COVERAGE`]
    pub opener_coverage: f64,
    /// See [`defaults::CLOSER_MIN_COVERAGE`]
    pub closer_min_coverage: f64,
    /// See [`defaults::CLOSER_COVERAGE`]
    pub closer_coverage: f64,
    /// See [`defaults::PAIRING_COVERAGE`]
    pub pairing_coverage: f64,
}

impl Default for InferenceThresholds {
    fn default() -> Self {
        Self {
            symmetric_coverage: defaults::SYMMETRIC_COVERAGE,
            balance_min: defaults::BALANCE_MIN,
            balance_max: defaults::BALANCE_MAX,
            opener_coverage: defaults::OPENER_COVERAGE,
            closer_min_coverage: defaults::CLOSER_MIN_COVERAGE,
            closer_coverage: defaults::CLOSER_COVERAGE,
            pairing_coverage: defaults::PAIRING_COVERAGE,
        }
    }
}

impl InferenceThresholds {
    /// Parse thresholds from a TOML table; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let thresholds: Self = toml::from_str(source)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Validate the thresholds
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("symmetric_coverage", self.symmetric_coverage),
            ("balance_min", self.balance_min),
            ("balance_max", self.balance_max),
            ("opener_coverage", self.opener_coverage),
            ("closer_min_coverage", self.closer_min_coverage),
            ("closer_coverage", self.closer_coverage),
            ("pairing_coverage", self.pairing_coverage),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::Configuration(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.balance_min > self.balance_max {
            return Err(AnalysisError::Configuration(format!(
                "balance_min ({}) must not exceed balance_max ({})",
                self.balance_min, self.balance_max
            )));
        }

        Ok(())
    }

    /// `value` lies within `[balance_min, balance_max]` times `reference`
    pub(crate) fn balanced(&self, value: u64, reference: u64) -> bool {
        let (value, reference) = (value as f64, reference as f64);
        value >= self.balance_min * reference && value <= self.balance_max * reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let t = InferenceThresholds::default();
        assert_eq!(t.symmetric_coverage, 0.9);
        assert_eq!(t.balance_min, 0.8);
        assert_eq!(t.balance_max, 1.4);
        assert_eq!(t.closer_min_coverage, 0.3);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let t = InferenceThresholds::from_toml_str("balance_max = 1.6\n").unwrap();
        assert_eq!(t.balance_max, 1.6);
        assert_eq!(t.balance_min, defaults::BALANCE_MIN);
        assert_eq!(t.pairing_coverage, defaults::PAIRING_COVERAGE);
    }

    #[test]
    fn test_rejects_inverted_balance() {
        let result = InferenceThresholds::from_toml_str("balance_min = 2.0\nbalance_max = 1.0\n");
        assert!(matches!(result, Err(AnalysisError::Configuration(_))));
    }

    #[test]
    fn test_rejects_negative() {
        let t = InferenceThresholds {
            opener_coverage: -0.1,
            ..Default::default()
        };
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("opener_coverage"));
    }

    #[test]
    fn test_balanced_bounds() {
        let t = InferenceThresholds::default();
        assert!(t.balanced(10, 10));
        assert!(t.balanced(8, 10));
        assert!(t.balanced(13, 10));
        assert!(!t.balanced(7, 10));
        assert!(!t.balanced(15, 10));
        assert!(t.balanced(0, 0));
    }
}
