//! Prescaler-search encoder
//!
//! Walks the prescaler table from the smallest multiplier up and takes the
//! first entry whose rounded divisor fits the 8-bit divisor register. Small
//! multipliers come first because they leave the most significant bits in
//! the divisor, so the first match is usually also the most accurate one.
//!
//! With the ÷1 setting the chip decodes divisors 2..=8 as twice their value,
//! so that entry is skipped for small divisors; the ÷2 entry covers the
//! same rates without the aliasing.

use ch341_hal::registers::PRE_NO_BUFFERING;

use super::{BaudError, EncodedRegisters};
use crate::prescaler::{PrescalerEntry, OSCILLATOR_HZ, PRESCALERS};

/// Slowest rate accepted by the prescaler search
pub const MIN_BAUD: u32 = 46;

/// Fastest rate accepted by the prescaler search
pub const MAX_BAUD: u32 = 3_030_000;

/// Smallest divisor the hardware accepts
pub const MIN_DIVISOR: u32 = 2;

/// Largest divisor the 8-bit register can hold
pub const MAX_DIVISOR: u32 = 256;

/// Divisors up to this value alias when the ÷1 prescaler is selected
pub const ALIASED_DIVISOR_MAX: u32 = 8;

/// Rounded divisor for `baud` behind a prescaler of `multiplier`
///
/// Computed at double resolution and rounded half up.
pub fn rounded_divisor(multiplier: u32, baud: u32) -> u32 {
    let twice = 2 * u64::from(OSCILLATOR_HZ) / (u64::from(multiplier) * u64::from(baud));
    ((twice + 1) / 2) as u32
}

/// First-match search over an arbitrary prescaler table
///
/// The table must be ordered by increasing multiplier.
pub fn search_in(table: &[PrescalerEntry], baud: u32) -> Result<EncodedRegisters, BaudError> {
    if baud == 0 {
        return Err(BaudError::InvalidBaudRate);
    }

    for entry in table {
        let divisor = rounded_divisor(entry.multiplier, baud);

        if entry.multiplier == 1 && divisor <= ALIASED_DIVISOR_MAX {
            continue;
        }

        if (MIN_DIVISOR..=MAX_DIVISOR).contains(&divisor) {
            return Ok(EncodedRegisters {
                prescaler: entry.code | PRE_NO_BUFFERING,
                // 256 wraps to 0, the down-counter's full period
                divisor: (MAX_DIVISOR - divisor) as u8,
            });
        }
    }

    Err(BaudError::NoValidDivisor)
}

/// Encode `baud` with the prescaler search
pub fn encode_prescaler_search(baud: u32) -> Result<EncodedRegisters, BaudError> {
    if !(MIN_BAUD..=MAX_BAUD).contains(&baud) {
        return Err(BaudError::InvalidBaudRate);
    }
    search_in(&PRESCALERS, baud)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_bounds() {
        assert_eq!(encode_prescaler_search(0), Err(BaudError::InvalidBaudRate));
        assert_eq!(encode_prescaler_search(45), Err(BaudError::InvalidBaudRate));
        assert!(encode_prescaler_search(46).is_ok());
        assert!(encode_prescaler_search(3_030_000).is_ok());
        assert_eq!(
            encode_prescaler_search(3_030_001),
            Err(BaudError::InvalidBaudRate)
        );
    }

    #[test]
    fn test_9600_first_match() {
        // ÷1 and ÷2 overflow the divisor, ÷8 gives 156.25 -> 156
        let regs = encode_prescaler_search(9600).unwrap();
        assert_eq!(regs.prescaler, 0x86);
        assert_eq!(regs.divisor, 100);
    }

    #[test]
    fn test_115200_uses_undivided_clock() {
        let regs = encode_prescaler_search(115_200).unwrap();
        assert_eq!(regs.prescaler, 0x87);
        assert_eq!(regs.divisor, (256u16 - 104) as u8);
    }

    #[test]
    fn test_aliased_divisor_skipped() {
        // ÷1 would need divisor 8, so ÷2 with divisor 4 is used
        let regs = encode_prescaler_search(1_500_000).unwrap();
        assert_eq!(regs.prescaler, 0x83);
        assert_eq!(regs.divisor, 252);

        // Divisor 9 behind ÷1 is fine
        let regs = encode_prescaler_search(1_333_333).unwrap();
        assert_eq!(regs.prescaler, 0x87);
        assert_eq!(regs.divisor, 247);
    }

    #[test]
    fn test_full_divisor_wraps_to_zero() {
        let regs = encode_prescaler_search(23_437).unwrap();
        assert_eq!(regs.prescaler, 0x83);
        assert_eq!(regs.divisor, 0);
    }

    #[test]
    fn test_slowest_rate() {
        let regs = encode_prescaler_search(46).unwrap();
        assert_eq!(regs.prescaler, 0x80);
        assert_eq!(regs.divisor, 1);
    }

    #[test]
    fn test_rounding_half_up() {
        // 12 MHz / (8 * 9600) = 156.25
        assert_eq!(rounded_divisor(8, 9600), 156);
        // 12 MHz / 80000 = 150
        assert_eq!(rounded_divisor(1, 80_000), 150);
        // 12 MHz / 1411765 = 8.4999... rounds down
        assert_eq!(rounded_divisor(1, 1_411_765), 8);
        // 12 MHz / 1411764 = 8.50000... rounds up
        assert_eq!(rounded_divisor(1, 1_411_764), 9);
    }

    #[test]
    fn test_exhausted_table() {
        let only_undivided = [PRESCALERS[0]];
        assert_eq!(search_in(&only_undivided, 46), Err(BaudError::NoValidDivisor));
        assert_eq!(search_in(&[], 9600), Err(BaudError::NoValidDivisor));
    }
}
