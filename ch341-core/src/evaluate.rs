//! Reverse evaluator
//!
//! Recomputes the baud rate the chip actually produces from a prescaler and
//! divisor register pair, reproducing two quirks of the silicon:
//!
//! - a stored divisor of exactly 1 behaves like 78
//! - behind the ÷1 prescaler, divisors 2..=8 run at twice their value

use crate::prescaler::{lookup, OSCILLATOR_HZ};

/// Raw divisor the silicon redefines
const QUIRK_DIVISOR: u32 = 1;

/// Divisor the chip actually uses in place of [`QUIRK_DIVISOR`]
const QUIRK_DIVISOR_EFFECTIVE: u32 = 78;

/// Decoded register pair
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedBaud {
    /// Output frequency in Hz; exactly 0.0 when the pair is undecodable
    pub achieved_hz: f64,
    /// Prescaler multiplier (0 when undecodable)
    pub multiplier: u32,
    /// Effective divisor after the hardware quirks (0 when undecodable)
    pub divisor: u32,
}

impl DecodedBaud {
    /// Sentinel for a prescaler code missing from the table
    pub const UNDECODABLE: Self = Self {
        achieved_hz: 0.0,
        multiplier: 0,
        divisor: 0,
    };

    /// Check for the 0 Hz sentinel
    pub fn is_decodable(&self) -> bool {
        self.achieved_hz != 0.0
    }

    /// Total division of the oscillator
    pub fn total_divider(&self) -> u32 {
        self.multiplier * self.divisor
    }
}

/// Effective (multiplier, divisor) pair for a register pair
///
/// Returns `None` when the prescaler code is not in the table.
pub fn effective_divider(prescaler_reg: u8, divisor_reg: u8) -> Option<(u32, u32)> {
    let multiplier = lookup(prescaler_reg)?.multiplier;

    let mut divisor = 256 - u32::from(divisor_reg);
    if divisor == QUIRK_DIVISOR {
        divisor = QUIRK_DIVISOR_EFFECTIVE;
    } else if multiplier == 1 && (2..=8).contains(&divisor) {
        divisor *= 2;
    }

    Some((multiplier, divisor))
}

/// Recompute the achieved baud rate from a register pair
pub fn decode_achieved_baud(prescaler_reg: u8, divisor_reg: u8) -> DecodedBaud {
    match effective_divider(prescaler_reg, divisor_reg) {
        Some((multiplier, divisor)) => DecodedBaud {
            achieved_hz: f64::from(OSCILLATOR_HZ) / f64::from(multiplier * divisor),
            multiplier,
            divisor,
        },
        None => DecodedBaud::UNDECODABLE,
    }
}

/// Signed deviation of `achieved` from `requested`, in percent
///
/// Positive when the chip runs faster than requested.
pub fn relative_error_percent(requested: u32, achieved: f64) -> f64 {
    (achieved / f64::from(requested) - 1.0) * 100.0
}

/// Absolute value without relying on std float intrinsics
pub(crate) fn abs(value: f64) -> f64 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}
