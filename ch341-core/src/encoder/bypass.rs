//! Legacy encoder with an optional divisor bypass
//!
//! Near 12 MHz / 256 the legacy word can only reach ÷2 × 128, and its
//! neighbours ÷2 × 127 and ÷2 × 129 are two steps away. With every
//! prescaler stage bypassed (code 7, ÷1) the divisor alone reaches the odd
//! totals in between, such as ÷1 × 255. This encoder computes both
//! candidates and keeps the no-divisor one only when its total divider is
//! strictly closer to the exact value; ties stay with the legacy encoding.

use ch341_hal::registers::PRE_NO_BUFFERING;

use super::legacy::encode_legacy;
use super::{BaudError, EncodedRegisters};
use crate::evaluate::effective_divider;
use crate::prescaler::OSCILLATOR_HZ;

/// Rate at which a single full-range divisor byte divides the oscillator
pub const BYPASS_CENTER_HZ: u32 = OSCILLATOR_HZ / 256;

/// Distance from [`BYPASS_CENTER_HZ`] within which the bypass is tried
pub const BYPASS_WINDOW_HZ: u32 = 100;

/// Divisor registers at or above this value alias behind ÷1
pub const BYPASS_DIVISOR_REG_LIMIT: u32 = 248;

/// Prescaler code with every prescaler stage bypassed
const NO_DIVISOR_CODE: u8 = 0x07;

/// Exact oscillator division for `baud` in 1/256 units
fn exact_divider_x256(baud: u32) -> u64 {
    (u64::from(OSCILLATOR_HZ) << 8) / u64::from(baud)
}

/// Distance of a candidate's total divider from the exact one, in 1/256 units
fn divider_error(regs: EncodedRegisters, exact_x256: u64) -> Option<u64> {
    let (multiplier, divisor) = effective_divider(regs.prescaler, regs.divisor)?;
    let candidate_x256 = u64::from(multiplier * divisor) << 8;
    Some(candidate_x256.abs_diff(exact_x256))
}

/// Encoding with all prescalers bypassed, if one exists for `baud`
pub fn no_divisor_candidate(baud: u32) -> Option<EncodedRegisters> {
    if baud == 0 {
        return None;
    }

    // Round at 1/256 resolution, then drop the fraction
    let divisor = (exact_divider_x256(baud) + 128) >> 8;
    if divisor == 0 || divisor > 256 {
        return None;
    }

    let divisor_reg = 256 - divisor as u32;
    if divisor_reg >= BYPASS_DIVISOR_REG_LIMIT {
        return None;
    }

    Some(EncodedRegisters {
        prescaler: NO_DIVISOR_CODE | PRE_NO_BUFFERING,
        divisor: divisor_reg as u8,
    })
}

/// Whether `baud` lies in the window where the bypass can help
pub fn in_bypass_window(baud: u32) -> bool {
    baud.abs_diff(BYPASS_CENTER_HZ) <= BYPASS_WINDOW_HZ
}

/// Encode `baud` with the legacy algorithm, bypassing the divisor when closer
pub fn encode_legacy_bypass(baud: u32) -> Result<EncodedRegisters, BaudError> {
    let legacy = encode_legacy(baud)?;

    if !in_bypass_window(baud) {
        return Ok(legacy);
    }

    let Some(bypass) = no_divisor_candidate(baud) else {
        return Ok(legacy);
    };

    let exact = exact_divider_x256(baud);
    match (divider_error(legacy, exact), divider_error(bypass, exact)) {
        (Some(legacy_err), Some(bypass_err)) if bypass_err < legacy_err => Ok(bypass),
        _ => Ok(legacy),
    }
}
