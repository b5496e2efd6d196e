//! Command-line arguments
//!
//! Every flag is optional. Values given here override the settings file,
//! which in turn overrides the built-in defaults.

use std::path::PathBuf;

use ch341_core::Strategy;

use crate::error::BenchError;

/// Usage text printed for `--help` and on argument errors
pub const USAGE: &str = "\
Usage: ch341-bench [OPTIONS]

Compare CH341 baud rate encoders against the standard rates and a sweep.

Options:
  --config <PATH>        TOML settings file
  --start <BAUD>         First rate of the sweep
  --end <BAUD>           End of the sweep (exclusive)
  --line-control <BYTE>  Line control byte written after the baud registers
  --reference <NAME>     Strategy checked against the bad threshold
                         (legacy, search, bypass)
  --no-list              Skip the standard rate table
  --no-sweep             Skip the sweep
  -v, --verbose          Debug logging and bad rate details
  -h, --help             Print this help";

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    /// Settings file (None = built-in defaults)
    pub config: Option<PathBuf>,
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub line_control: Option<u8>,
    pub reference: Option<Strategy>,
    pub no_list: bool,
    pub no_sweep: bool,
    pub verbose: bool,
    pub help: bool,
}

impl Args {
    /// Parse arguments, excluding the program name
    pub fn from_args(args: &[String]) -> Result<Self, BenchError> {
        let mut parsed = Args::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    parsed.config = Some(PathBuf::from(value(args, &mut i, "--config")?));
                }
                "--start" => {
                    parsed.start = Some(parse_rate(value(args, &mut i, "--start")?)?);
                }
                "--end" => {
                    parsed.end = Some(parse_rate(value(args, &mut i, "--end")?)?);
                }
                "--line-control" => {
                    parsed.line_control =
                        Some(parse_byte(value(args, &mut i, "--line-control")?)?);
                }
                "--reference" => {
                    let name = value(args, &mut i, "--reference")?;
                    parsed.reference = Some(Strategy::from_name(name).ok_or_else(|| {
                        BenchError::InvalidArgument(format!("unknown strategy '{}'", name))
                    })?);
                }
                "--no-list" => parsed.no_list = true,
                "--no-sweep" => parsed.no_sweep = true,
                "-v" | "--verbose" => parsed.verbose = true,
                "-h" | "--help" => parsed.help = true,
                other => {
                    return Err(BenchError::InvalidArgument(format!(
                        "unknown argument '{}'",
                        other
                    )));
                }
            }
            i += 1;
        }

        Ok(parsed)
    }
}

/// Take the value following the flag at `args[*i]`
fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, BenchError> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| BenchError::InvalidArgument(format!("{} requires a value", flag)))
}

fn parse_rate(text: &str) -> Result<u32, BenchError> {
    text.parse()
        .map_err(|_| BenchError::InvalidArgument(format!("'{}' is not a baud rate", text)))
}

/// Decimal or `0x`-prefixed hex
fn parse_byte(text: &str) -> Result<u8, BenchError> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| BenchError::InvalidArgument(format!("'{}' is not a byte", text)))
}
