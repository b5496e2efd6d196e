//! Vendor control-transfer abstraction
//!
//! The CH341 is configured through a vendor "write register" request whose
//! `wValue` carries two register addresses and whose `wIndex` carries the
//! two values. One transfer therefore updates a pair of registers.

/// Control-transfer writer
///
/// Implemented by the USB transport on a real system and by
/// [`RegisterFile`](crate::RegisterFile) for offline evaluation.
pub trait ControlOut {
    /// Error type for a failed transfer (timeout, disconnect, ...)
    type Error;

    /// Write two registers in one transfer
    ///
    /// The high bytes of `address` and `value` form the first
    /// (register, value) pair, the low bytes the second.
    fn control_write(&mut self, address: u16, value: u16) -> Result<(), Self::Error>;
}

impl<T: ControlOut + ?Sized> ControlOut for &mut T {
    type Error = T::Error;

    fn control_write(&mut self, address: u16, value: u16) -> Result<(), Self::Error> {
        (**self).control_write(address, value)
    }
}

/// Pack two register addresses into a control-transfer address word
///
/// `first` ends up in the high byte and is written first.
pub const fn register_pair(first: u8, second: u8) -> u16 {
    ((first as u16) << 8) | second as u16
}

/// Split a control-transfer word into (high, low) bytes
pub const fn split_word(word: u16) -> (u8, u8) {
    ((word >> 8) as u8, word as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_pair_order() {
        assert_eq!(register_pair(0x13, 0x12), 0x1312);
        assert_eq!(register_pair(0x25, 0x18), 0x2518);
    }

    #[test]
    fn test_split_word() {
        assert_eq!(split_word(0x1312), (0x13, 0x12));
        assert_eq!(split_word(0x00C3), (0x00, 0xC3));
    }
}
