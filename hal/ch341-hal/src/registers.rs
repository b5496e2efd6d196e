//! CH341 register map and simulated register file

use core::convert::Infallible;

use crate::control::{split_word, ControlOut};

/// Baud rate prescaler select register
pub const REG_BPS_PRE: u8 = 0x12;
/// Baud rate divisor register (stored as `256 - divisor`)
pub const REG_BPS_DIV: u8 = 0x13;
/// Line control register
pub const REG_LCR: u8 = 0x18;
/// Second line control register, written together with [`REG_LCR`]
pub const REG_LCR2: u8 = 0x25;

/// Number of addressable registers in the simulated register file
pub const REGISTER_FILE_SIZE: usize = 64;

/// Prescaler register bit 7: forward data immediately
///
/// Without it the CH341 buffers received data until a full 32-byte
/// endpoint packet is available.
pub const PRE_NO_BUFFERING: u8 = 1 << 7;

/// Simulated register file
///
/// Captures the bytes an encoder writes so they can be decoded again.
/// Writes to unmapped addresses are dropped without error, the same way
/// the chip ignores them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterFile {
    regs: [u8; REGISTER_FILE_SIZE],
    writes: u32,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Create a register file with every register cleared
    pub const fn new() -> Self {
        Self {
            regs: [0; REGISTER_FILE_SIZE],
            writes: 0,
        }
    }

    /// Clear all registers and the write counter
    pub fn reset(&mut self) {
        self.regs = [0; REGISTER_FILE_SIZE];
        self.writes = 0;
    }

    /// Store `value` at `index`; out-of-range indices are ignored
    pub fn write_register(&mut self, index: u8, value: u8) {
        if let Some(slot) = self.regs.get_mut(index as usize) {
            *slot = value;
            self.writes = self.writes.wrapping_add(1);
        }
    }

    /// Read a register; unmapped addresses read as zero
    pub fn read_register(&self, index: u8) -> u8 {
        self.regs.get(index as usize).copied().unwrap_or(0)
    }

    /// Number of writes that landed on a mapped register since the last reset
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    /// Current (prescaler, divisor) register pair
    pub fn baud_registers(&self) -> (u8, u8) {
        (self.read_register(REG_BPS_PRE), self.read_register(REG_BPS_DIV))
    }
}

impl ControlOut for RegisterFile {
    type Error = Infallible;

    fn control_write(&mut self, address: u16, value: u16) -> Result<(), Self::Error> {
        let (first_reg, second_reg) = split_word(address);
        let (first_val, second_val) = split_word(value);
        self.write_register(first_reg, first_val);
        self.write_register(second_reg, second_val);
        Ok(())
    }
}
