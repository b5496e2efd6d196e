//! Bench settings
//!
//! Loaded from an optional TOML file, then overridden by command-line flags.
//!
//! ```toml
//! line_control = 0xC3
//! list = true
//!
//! [compare]
//! reference = "search"
//! tolerance_pct = 0.01
//! bad_threshold_pct = 0.8
//!
//! [sweep]
//! enabled = true
//! start = 46
//! end = 100000
//! ```

use std::fs;
use std::ops::Range;
use std::path::Path;

use ch341_core::CompareConfig;
use serde::Deserialize;
use tracing::debug;

use crate::args::Args;
use crate::error::BenchError;

/// Default first rate of the sweep (slowest rate every encoder accepts)
pub const DEFAULT_SWEEP_START: u32 = 46;

/// Default end of the sweep (exclusive)
pub const DEFAULT_SWEEP_END: u32 = 100_000;

/// Default line control byte: 8 data bits, no parity, 1 stop bit, RX/TX on
pub const DEFAULT_LINE_CONTROL: u8 = 0xC3;

/// Sweep section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    pub enabled: bool,
    pub start: u32,
    /// Exclusive
    pub end: u32,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            start: DEFAULT_SWEEP_START,
            end: DEFAULT_SWEEP_END,
        }
    }
}

impl SweepSettings {
    pub fn range(&self) -> Range<u32> {
        self.start..self.end
    }
}

/// Complete bench settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BenchSettings {
    /// Line control byte written after the baud registers
    pub line_control: u8,
    /// Print the standard rate table
    pub list: bool,
    pub compare: CompareConfig,
    pub sweep: SweepSettings,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            line_control: DEFAULT_LINE_CONTROL,
            list: true,
            compare: CompareConfig::default(),
            sweep: SweepSettings::default(),
        }
    }
}

impl BenchSettings {
    /// Parse settings from TOML text; missing keys keep their defaults
    pub fn from_toml(text: &str) -> Result<Self, BenchError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a settings file
    pub fn load(path: &Path) -> Result<Self, BenchError> {
        let text = fs::read_to_string(path).map_err(|source| BenchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded {} bytes of settings from {}", text.len(), path.display());
        Self::from_toml(&text)
    }

    /// Settings for a run: file (or defaults), then flags, then validation
    pub fn resolve(args: &Args) -> Result<Self, BenchError> {
        let mut settings = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply_args(args);
        settings.validate()?;
        Ok(settings)
    }

    /// Override settings with whatever the command line set
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(start) = args.start {
            self.sweep.start = start;
        }
        if let Some(end) = args.end {
            self.sweep.end = end;
        }
        if let Some(line_control) = args.line_control {
            self.line_control = line_control;
        }
        if let Some(reference) = args.reference {
            self.compare = self.compare.with_reference(reference);
        }
        if args.no_list {
            self.list = false;
        }
        if args.no_sweep {
            self.sweep.enabled = false;
        }
    }

    /// Reject settings a run cannot use
    pub fn validate(&self) -> Result<(), BenchError> {
        if !self.compare.is_valid() {
            return Err(BenchError::InvalidThreshold);
        }
        if self.sweep.enabled && self.sweep.start >= self.sweep.end {
            return Err(BenchError::EmptyRange {
                start: self.sweep.start,
                end: self.sweep.end,
            });
        }
        Ok(())
    }
}
