//! Legacy factor encoder
//!
//! The classic CH341 driver encoding. The oscillator-derived base factor is
//! divided by the requested rate, then shifted right by 3 (one ÷8 prescaler
//! stage) until it fits in 16 bits. The number of unused shift steps is the
//! prescaler code, so codes 3, 2, 1 and 0 select ÷2, ÷16, ÷128 and ÷1024.
//!
//! The resulting word holds the complement of the factor in its high byte
//! (the divisor register) and the prescaler code in its low byte.

use ch341_hal::registers::PRE_NO_BUFFERING;

use super::{BaudError, EncodedRegisters};

/// Base factor for the legacy encoding
pub const BAUDBASE_FACTOR: u32 = 1_532_620_800;

/// Maximum number of ÷8 shift steps
pub const BAUDBASE_DIVMAX: u8 = 3;

/// Largest factor that still fits the divisor register
pub const FACTOR_MAX: u32 = 0xFFF0;

/// Compute the legacy 16-bit register word for `baud`
///
/// High byte: divisor register. Low byte: prescaler register.
pub fn legacy_word(baud: u32) -> Result<u16, BaudError> {
    if baud == 0 {
        return Err(BaudError::InvalidBaudRate);
    }

    let mut factor = BAUDBASE_FACTOR / baud;
    let mut divisor = BAUDBASE_DIVMAX;

    while factor > FACTOR_MAX && divisor > 0 {
        factor >>= 3;
        divisor -= 1;
    }

    if factor > FACTOR_MAX {
        return Err(BaudError::InvalidBaudRate);
    }

    // factor == 0 complements to 0x10000, whose high byte is dropped
    let complement = 0x1_0000 - factor;
    let word = (complement & 0xFF00) as u16
        | u16::from(divisor & 0x03)
        | u16::from(PRE_NO_BUFFERING);

    Ok(word)
}

/// Encode `baud` with the legacy factor algorithm
pub fn encode_legacy(baud: u32) -> Result<EncodedRegisters, BaudError> {
    legacy_word(baud).map(EncodedRegisters::from_word)
}
