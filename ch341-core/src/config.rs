//! Comparison configuration
//!
//! The thresholds are judgment calls rather than hardware limits, so they
//! are plain fields with defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::encoder::Strategy;

/// Default minimum difference in |error| (percentage points) for a win
pub const DEFAULT_TOLERANCE_PCT: f64 = 0.01;

/// Default |error| (percent) above which a reference result is "bad"
pub const DEFAULT_BAD_THRESHOLD_PCT: f64 = 0.8;

/// Settings for a comparison sweep
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompareConfig {
    /// Strategy whose errors feed the bad counter
    pub reference: Strategy,
    /// Differences in |error| at or below this are rounding noise
    pub tolerance_pct: f64,
    /// Reference |error| above this counts as bad
    pub bad_threshold_pct: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            reference: Strategy::PrescalerSearch,
            tolerance_pct: DEFAULT_TOLERANCE_PCT,
            bad_threshold_pct: DEFAULT_BAD_THRESHOLD_PCT,
        }
    }
}

impl CompareConfig {
    /// Use a different reference strategy
    pub fn with_reference(mut self, reference: Strategy) -> Self {
        self.reference = reference;
        self
    }

    /// Check that both thresholds are finite and non-negative
    pub fn is_valid(&self) -> bool {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        ok(self.tolerance_pct) && ok(self.bad_threshold_pct)
    }
}
