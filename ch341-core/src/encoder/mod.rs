//! Baud rate encoders
//!
//! Three strategies turn a requested baud rate into the CH341 prescaler and
//! divisor registers:
//!
//! - [`Strategy::Legacy`]: the classic 16-bit factor/divisor word
//! - [`Strategy::PrescalerSearch`]: walks the prescaler table for the first
//!   in-range 8-bit divisor
//! - [`Strategy::LegacyBypass`]: legacy, but swaps in a no-divisor encoding
//!   where that lands closer to the request
//!
//! Each strategy is a pure function of the baud rate. [`Strategy::encode`]
//! computes the register pair and writes it, together with the line control
//! byte, through a [`ControlOut`] transport.

pub mod bypass;
pub mod legacy;
pub mod search;

use ch341_hal::control::register_pair;
use ch341_hal::registers::{REG_BPS_DIV, REG_BPS_PRE, REG_LCR, REG_LCR2};
use ch341_hal::ControlOut;

/// Register bytes produced by an encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodedRegisters {
    /// Prescaler register: code in bits 0-2, bit 7 disables buffering
    pub prescaler: u8,
    /// Divisor register, stored as `256 - divisor`
    pub divisor: u8,
}

impl EncodedRegisters {
    /// Split a legacy combined word (divisor in the high byte)
    pub const fn from_word(word: u16) -> Self {
        Self {
            prescaler: word as u8,
            divisor: (word >> 8) as u8,
        }
    }

    /// Combined control-transfer value word (divisor in the high byte)
    pub const fn to_word(self) -> u16 {
        ((self.divisor as u16) << 8) | self.prescaler as u16
    }
}

/// Errors from computing a register encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudError {
    /// Rate is zero, outside the encoder's domain, or does not fit the
    /// register width
    InvalidBaudRate,
    /// No prescaler entry gives a divisor in range
    NoValidDivisor,
}

/// Errors from encoding and writing a baud rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError<E> {
    /// Rate is zero, outside the encoder's domain, or does not fit the
    /// register width
    InvalidBaudRate,
    /// No prescaler entry gives a divisor in range
    NoValidDivisor,
    /// The register write failed; register contents must not be trusted
    Transport(E),
}

impl<E> From<BaudError> for EncodeError<E> {
    fn from(e: BaudError) -> Self {
        match e {
            BaudError::InvalidBaudRate => EncodeError::InvalidBaudRate,
            BaudError::NoValidDivisor => EncodeError::NoValidDivisor,
        }
    }
}

impl<E> EncodeError<E> {
    /// Separate computation errors from transport failures
    pub fn into_baud_error(self) -> Result<BaudError, E> {
        match self {
            EncodeError::InvalidBaudRate => Ok(BaudError::InvalidBaudRate),
            EncodeError::NoValidDivisor => Ok(BaudError::NoValidDivisor),
            EncodeError::Transport(e) => Err(e),
        }
    }
}

/// Encoding strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// 16-bit factor word with up to three ÷8 shifts
    #[cfg_attr(feature = "serde", serde(rename = "legacy"))]
    Legacy,
    /// First-match search over the prescaler table
    #[cfg_attr(feature = "serde", serde(rename = "search"))]
    PrescalerSearch,
    /// Legacy with a no-divisor alternative near 12 MHz / 256
    #[cfg_attr(feature = "serde", serde(rename = "bypass"))]
    LegacyBypass,
}

/// Number of strategies
pub const STRATEGY_COUNT: usize = 3;

impl Strategy {
    /// Every strategy, in report order
    pub const ALL: [Strategy; STRATEGY_COUNT] = [
        Strategy::Legacy,
        Strategy::PrescalerSearch,
        Strategy::LegacyBypass,
    ];

    /// Position in [`Strategy::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Strategy::Legacy => 0,
            Strategy::PrescalerSearch => 1,
            Strategy::LegacyBypass => 2,
        }
    }

    /// Short name used in reports and settings
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Legacy => "legacy",
            Strategy::PrescalerSearch => "search",
            Strategy::LegacyBypass => "bypass",
        }
    }

    /// Parse a short name as produced by [`Strategy::name`]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Compute the register pair for `baud` without writing anything
    pub fn compute(self, baud: u32) -> Result<EncodedRegisters, BaudError> {
        match self {
            Strategy::Legacy => legacy::encode_legacy(baud),
            Strategy::PrescalerSearch => search::encode_prescaler_search(baud),
            Strategy::LegacyBypass => bypass::encode_legacy_bypass(baud),
        }
    }

    /// Compute the register pair for `baud` and write it
    ///
    /// Writes the baud registers first, then `line_control` (unmodified) to
    /// the line control register pair. Nothing is written when the
    /// computation fails. A transport error aborts immediately.
    pub fn encode<T: ControlOut>(
        self,
        transport: &mut T,
        baud: u32,
        line_control: u8,
    ) -> Result<EncodedRegisters, EncodeError<T::Error>> {
        let regs = self.compute(baud)?;
        write_baud_and_lcr(transport, regs, line_control)?;
        Ok(regs)
    }
}

/// Write a baud register pair followed by the line control byte
pub fn write_baud_and_lcr<T: ControlOut>(
    transport: &mut T,
    regs: EncodedRegisters,
    line_control: u8,
) -> Result<(), EncodeError<T::Error>> {
    transport
        .control_write(register_pair(REG_BPS_DIV, REG_BPS_PRE), regs.to_word())
        .map_err(EncodeError::Transport)?;
    transport
        .control_write(register_pair(REG_LCR2, REG_LCR), line_control as u16)
        .map_err(EncodeError::Transport)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ch341_hal::RegisterFile;

    /// Transport that fails after a number of successful transfers
    struct FlakyTransport {
        remaining_ok: u8,
        transfers: u8,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Disconnected;

    impl ControlOut for FlakyTransport {
        type Error = Disconnected;

        fn control_write(&mut self, _address: u16, _value: u16) -> Result<(), Self::Error> {
            self.transfers += 1;
            if self.remaining_ok == 0 {
                return Err(Disconnected);
            }
            self.remaining_ok -= 1;
            Ok(())
        }
    }

    #[test]
    fn test_word_roundtrip() {
        let regs = EncodedRegisters {
            prescaler: 0x86,
            divisor: 0x64,
        };
        assert_eq!(regs.to_word(), 0x6486);
        assert_eq!(EncodedRegisters::from_word(0x6486), regs);
    }

    #[test]
    fn test_encode_writes_registers_and_lcr() {
        let mut file = RegisterFile::new();
        let regs = Strategy::PrescalerSearch
            .encode(&mut file, 9600, 0xC3)
            .unwrap();

        assert_eq!(file.baud_registers(), (regs.prescaler, regs.divisor));
        assert_eq!(file.read_register(REG_LCR), 0xC3);
        assert_eq!(file.read_register(REG_LCR2), 0x00);
        assert_eq!(file.write_count(), 4);
    }

    #[test]
    fn test_encode_failure_writes_nothing() {
        let mut file = RegisterFile::new();
        let result = Strategy::PrescalerSearch.encode(&mut file, 45, 0);

        assert_eq!(result, Err(EncodeError::InvalidBaudRate));
        assert_eq!(file.write_count(), 0);
    }

    #[test]
    fn test_transport_failure_propagates() {
        for strategy in Strategy::ALL {
            let mut transport = FlakyTransport {
                remaining_ok: 0,
                transfers: 0,
            };
            let result = strategy.encode(&mut transport, 115_200, 0);
            assert_eq!(result, Err(EncodeError::Transport(Disconnected)));
            assert_eq!(transport.transfers, 1);
        }
    }

    #[test]
    fn test_transport_failure_on_lcr_write() {
        let mut transport = FlakyTransport {
            remaining_ok: 1,
            transfers: 0,
        };
        let result = Strategy::Legacy.encode(&mut transport, 9600, 0);
        assert_eq!(result, Err(EncodeError::Transport(Disconnected)));
        assert_eq!(transport.transfers, 2);
    }

    #[test]
    fn test_encode_error_from_baud_error() {
        let e: EncodeError<Disconnected> = BaudError::NoValidDivisor.into();
        assert_eq!(e, EncodeError::NoValidDivisor);
        assert_eq!(e.into_baud_error(), Ok(BaudError::NoValidDivisor));
        assert_eq!(
            EncodeError::Transport(Disconnected).into_baud_error(),
            Err(Disconnected)
        );
    }

    #[test]
    fn test_strategy_names() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_name(strategy.name()), Some(strategy));
            assert_eq!(Strategy::ALL[strategy.index()], strategy);
        }
        assert_eq!(Strategy::from_name("fastest"), None);
    }
}
