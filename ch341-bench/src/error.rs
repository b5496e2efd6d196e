//! Bench error type

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a bench run
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Empty sweep range {start}..{end}")]
    EmptyRange { start: u32, end: u32 },

    #[error("Thresholds must be finite and non-negative")]
    InvalidThreshold,
}
