//! Baud rate encoding core for the CH341 USB-UART bridge
//!
//! This crate contains everything needed to turn a requested baud rate into
//! CH341 register values and to judge the result, without touching a real
//! device:
//!
//! - Prescaler table of the chip's clock generator
//! - Three competing encoders (legacy factor, prescaler search, legacy with
//!   divisor bypass)
//! - Reverse evaluator that recomputes the achieved baud rate from the
//!   register bytes
//! - Comparison harness that sweeps rates and tallies which encoder wins

#![no_std]
#![deny(unsafe_code)]

pub mod compare;
pub mod config;
pub mod encoder;
pub mod evaluate;
pub mod prescaler;

pub use compare::{ComparisonTally, RateComparison, Trial};
pub use config::CompareConfig;
pub use encoder::{BaudError, EncodeError, EncodedRegisters, Strategy};
pub use evaluate::{decode_achieved_baud, relative_error_percent, DecodedBaud};
pub use prescaler::{PrescalerEntry, OSCILLATOR_HZ, PRESCALERS};
