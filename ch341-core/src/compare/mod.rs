//! Comparison harness
//!
//! Runs every [`Strategy`] against the same requested rate, captures the
//! bytes each one writes into a simulated register file, and decodes them
//! again to see how close the chip would get. Sweeps repeat that over a
//! range of rates and accumulate a [`ComparisonTally`].

pub mod rates;
pub mod tally;

use core::ops::Range;

use ch341_hal::RegisterFile;

use crate::config::CompareConfig;
use crate::encoder::{BaudError, EncodedRegisters, Strategy, STRATEGY_COUNT};
use crate::evaluate::{abs, decode_achieved_baud, relative_error_percent};

pub use rates::{STANDARD_BAUD_RATES, STANDARD_RATE_COUNT};
pub use tally::{ComparisonTally, MAX_BAD_SAMPLES};

/// Result of encoding one rate and decoding it again
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EvaluationResult {
    /// Requested baud rate
    pub requested: u32,
    /// Register bytes read back after encoding
    pub registers: EncodedRegisters,
    /// Frequency the chip would produce (0.0 if undecodable)
    pub achieved_hz: f64,
    /// Signed error in percent, `None` if undecodable
    pub error_percent: Option<f64>,
    /// Prescaler multiplier
    pub multiplier: u32,
    /// Effective divisor
    pub divisor: u32,
}

impl EvaluationResult {
    /// Evaluate a register pair against the requested rate
    pub fn from_registers(requested: u32, registers: EncodedRegisters) -> Self {
        let decoded = decode_achieved_baud(registers.prescaler, registers.divisor);
        let error_percent = decoded
            .is_decodable()
            .then(|| relative_error_percent(requested, decoded.achieved_hz));

        Self {
            requested,
            registers,
            achieved_hz: decoded.achieved_hz,
            error_percent,
            multiplier: decoded.multiplier,
            divisor: decoded.divisor,
        }
    }
}

/// One strategy's attempt at one rate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Trial {
    /// Strategy under test
    pub strategy: Strategy,
    /// Evaluation, or why the encoder refused the rate
    pub outcome: Result<EvaluationResult, BaudError>,
}

impl Trial {
    /// |error| in percent, if the trial produced a decodable encoding
    pub fn abs_error(&self) -> Option<f64> {
        self.outcome
            .as_ref()
            .ok()
            .and_then(|result| result.error_percent)
            .map(abs)
    }
}

/// All strategies' trials for one rate, in [`Strategy::ALL`] order
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateComparison {
    /// Requested baud rate
    pub requested: u32,
    /// One trial per strategy
    pub trials: [Trial; STRATEGY_COUNT],
}

impl RateComparison {
    /// Trial of a given strategy
    pub fn trial(&self, strategy: Strategy) -> &Trial {
        &self.trials[strategy.index()]
    }
}

/// Encode `baud` with `strategy` into a freshly reset register file and
/// evaluate what was written
///
/// A failed encode yields its error; the register contents are not read.
pub fn run_trial(
    registers: &mut RegisterFile,
    strategy: Strategy,
    baud: u32,
    line_control: u8,
) -> Trial {
    registers.reset();

    let outcome = match strategy.encode(registers, baud, line_control) {
        Ok(_) => {
            let (prescaler, divisor) = registers.baud_registers();
            Ok(EvaluationResult::from_registers(
                baud,
                EncodedRegisters { prescaler, divisor },
            ))
        }
        Err(e) => match e.into_baud_error() {
            Ok(baud_error) => Err(baud_error),
            Err(never) => match never {},
        },
    };

    Trial { strategy, outcome }
}

/// Run every strategy against one rate
pub fn compare_rate(baud: u32, line_control: u8) -> RateComparison {
    let mut registers = RegisterFile::new();
    let trials =
        Strategy::ALL.map(|strategy| run_trial(&mut registers, strategy, baud, line_control));

    RateComparison {
        requested: baud,
        trials,
    }
}

/// Compare every integer rate in `range` and tally the outcome
pub fn sweep(range: Range<u32>, line_control: u8, config: &CompareConfig) -> ComparisonTally {
    let mut tally = ComparisonTally::new(*config);
    for baud in range {
        tally.record(&compare_rate(baud, line_control));
    }
    tally
}

/// Compare every rate of [`STANDARD_BAUD_RATES`]
pub fn compare_standard_rates(line_control: u8) -> impl Iterator<Item = RateComparison> {
    STANDARD_BAUD_RATES
        .into_iter()
        .map(move |baud| compare_rate(baud, line_control))
}
