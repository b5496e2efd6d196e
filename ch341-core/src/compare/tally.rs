//! Win/loss bookkeeping for comparison sweeps

use heapless::Vec;

use super::RateComparison;
use crate::config::CompareConfig;
use crate::encoder::{Strategy, STRATEGY_COUNT};

/// How many bad rates are kept for inspection
pub const MAX_BAD_SAMPLES: usize = 16;

/// Aggregated outcome of a sweep
///
/// `wins(a, b)` counts the rates where `a` had a lower |error| than `b` by
/// more than the configured tolerance. Rates where either side failed to
/// encode or decoded to 0 Hz are left out of that comparison and counted in
/// `failures` instead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComparisonTally {
    config: CompareConfig,
    evaluated: u32,
    wins: [[u32; STRATEGY_COUNT]; STRATEGY_COUNT],
    failures: [u32; STRATEGY_COUNT],
    bad: u32,
    bad_samples: Vec<u32, MAX_BAD_SAMPLES>,
}

impl ComparisonTally {
    /// Create an empty tally
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            evaluated: 0,
            wins: [[0; STRATEGY_COUNT]; STRATEGY_COUNT],
            failures: [0; STRATEGY_COUNT],
            bad: 0,
            bad_samples: Vec::new(),
        }
    }

    /// Add one rate's comparison
    pub fn record(&mut self, comparison: &RateComparison) {
        self.evaluated += 1;

        let errors: [Option<f64>; STRATEGY_COUNT] =
            core::array::from_fn(|i| comparison.trials[i].abs_error());

        for (failures, error) in self.failures.iter_mut().zip(errors.iter()) {
            if error.is_none() {
                *failures += 1;
            }
        }

        for a in 0..STRATEGY_COUNT {
            for b in 0..STRATEGY_COUNT {
                if a == b {
                    continue;
                }
                if let (Some(ea), Some(eb)) = (errors[a], errors[b]) {
                    let gap = if ea > eb { ea - eb } else { eb - ea };
                    if gap > self.config.tolerance_pct && ea < eb {
                        self.wins[a][b] += 1;
                    }
                }
            }
        }

        if let Some(error) = errors[self.config.reference.index()] {
            if error > self.config.bad_threshold_pct {
                self.bad += 1;
                // Keep the first few only
                let _ = self.bad_samples.push(comparison.requested);
            }
        }
    }

    /// Fold another tally over a disjoint range into this one
    ///
    /// Bad samples are kept up to capacity, in order of `self` then `other`.
    pub fn merge(&mut self, other: &ComparisonTally) {
        self.evaluated += other.evaluated;
        for a in 0..STRATEGY_COUNT {
            self.failures[a] += other.failures[a];
            for b in 0..STRATEGY_COUNT {
                self.wins[a][b] += other.wins[a][b];
            }
        }
        self.bad += other.bad;
        for &baud in other.bad_samples.iter() {
            if self.bad_samples.push(baud).is_err() {
                break;
            }
        }
    }

    /// Configuration the tally was built with
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Number of rates recorded
    pub fn evaluated(&self) -> u32 {
        self.evaluated
    }

    /// Rates where `winner` beat `loser`
    pub fn wins(&self, winner: Strategy, loser: Strategy) -> u32 {
        self.wins[winner.index()][loser.index()]
    }

    /// Rates where `strategy` failed to produce a decodable encoding
    pub fn failures(&self, strategy: Strategy) -> u32 {
        self.failures[strategy.index()]
    }

    /// Rates where the reference error exceeded the bad threshold
    pub fn bad(&self) -> u32 {
        self.bad
    }

    /// First bad rates, ascending within a sweep
    pub fn bad_samples(&self) -> &[u32] {
        &self.bad_samples
    }
}
