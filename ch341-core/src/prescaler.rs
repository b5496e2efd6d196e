//! Prescaler table of the CH341 baud rate generator
//!
//! The 12 MHz oscillator passes through three chained prescalers before the
//! 8-bit divisor. Each of the low three bits of the prescaler register
//! bypasses one stage:
//!
//! | Bit | Stage bypassed |
//! |-----|----------------|
//! | 0   | ÷8             |
//! | 1   | ÷64            |
//! | 2   | ÷2             |
//!
//! That gives eight combined multipliers from 1 to 1024.

/// Base oscillator frequency in Hz
pub const OSCILLATOR_HZ: u32 = 12_000_000;

/// Mask for the prescaler code in the prescaler register
pub const PRESCALER_CODE_MASK: u8 = 0x07;

/// One prescaler setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PrescalerEntry {
    /// 3-bit register code
    pub code: u8,
    /// Total division applied before the divisor stage
    pub multiplier: u32,
}

impl PrescalerEntry {
    const fn new(code: u8) -> Self {
        Self {
            code,
            multiplier: multiplier_for_code(code),
        }
    }
}

/// All prescaler settings, smallest multiplier first
///
/// Searches walk this table in order, so it must stay sorted.
pub static PRESCALERS: [PrescalerEntry; 8] = [
    PrescalerEntry::new(7),
    PrescalerEntry::new(3),
    PrescalerEntry::new(6),
    PrescalerEntry::new(2),
    PrescalerEntry::new(5),
    PrescalerEntry::new(1),
    PrescalerEntry::new(4),
    PrescalerEntry::new(0),
];

/// Combined multiplier of the chained prescalers for a 3-bit code
pub const fn multiplier_for_code(code: u8) -> u32 {
    let div8 = if code & 0x01 != 0 { 1 } else { 8 };
    let div64 = if code & 0x02 != 0 { 1 } else { 64 };
    let div2 = if code & 0x04 != 0 { 1 } else { 2 };
    div8 * div64 * div2
}

/// Find the table entry for the code held in a prescaler register byte
///
/// Only the low three bits are compared; the rest of the byte carries
/// flags.
pub fn lookup(prescaler_reg: u8) -> Option<&'static PrescalerEntry> {
    PRESCALERS
        .iter()
        .find(|entry| entry.code == prescaler_reg & PRESCALER_CODE_MASK)
}
