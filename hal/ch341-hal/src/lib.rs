//! CH341 Hardware Abstraction Layer
//!
//! This crate defines the register map of the CH341 baud rate generator and
//! the control-transfer boundary that every register write goes through.
//! Encoders in `ch341-core` only ever see the [`ControlOut`] trait, so the
//! same code drives a real USB transport or the simulated [`RegisterFile`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ch341-core (encoders, evaluator)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ch341-hal (this crate - ControlOut)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ USB control   │       │ RegisterFile  │
//! │ transfer      │       │ (simulated)   │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod control;
pub mod registers;

pub use control::ControlOut;
pub use registers::{RegisterFile, REGISTER_FILE_SIZE};
