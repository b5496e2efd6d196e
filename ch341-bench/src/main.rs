//! CH341 baud rate bench
//!
//! Prints how close each encoder gets to the standard baud rates, then
//! sweeps a range of integer rates and summarizes which encoder wins.

mod args;
mod error;
mod report;
mod settings;

use std::ops::Range;
use std::process::ExitCode;

use ch341_core::compare::{compare_rate, compare_standard_rates, sweep, STANDARD_RATE_COUNT};
use ch341_core::{CompareConfig, ComparisonTally};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use args::{Args, USAGE};
use error::BenchError;
use settings::BenchSettings;

/// Rates per sweep chunk; progress is logged after each one
const SWEEP_CHUNK: u32 = 10_000;

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match Args::from_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), BenchError> {
    let settings = BenchSettings::resolve(args)?;
    debug!("Settings: {:?}", settings);

    if settings.list {
        info!("Comparing {} standard rates", STANDARD_RATE_COUNT);
        println!("{}", report::rate_header());
        for comparison in compare_standard_rates(settings.line_control) {
            println!("{}", report::rate_row(&comparison));
        }
    }

    if settings.sweep.enabled {
        let range = settings.sweep.range();
        info!(
            "Sweeping {}..{} against {}",
            range.start,
            range.end,
            settings.compare.reference.name()
        );

        let tally = chunked_sweep(
            range.clone(),
            SWEEP_CHUNK,
            settings.line_control,
            &settings.compare,
        );
        println!("{}", report::sweep_summary(&range, &tally));

        if tally.bad() > 0 {
            warn!(
                "{} rates above {:.2}% error with {}",
                tally.bad(),
                settings.compare.bad_threshold_pct,
                settings.compare.reference.name()
            );
        }

        for &baud in tally.bad_samples() {
            let comparison = compare_rate(baud, settings.line_control);
            for trial in comparison.trials.iter() {
                debug!("{}", report::trial_detail(baud, trial));
            }
        }
    }

    Ok(())
}

/// Sweep `range` in chunks of `chunk` rates, merging the partial tallies
fn chunked_sweep(
    range: Range<u32>,
    chunk: u32,
    line_control: u8,
    config: &CompareConfig,
) -> ComparisonTally {
    let mut tally = ComparisonTally::new(*config);
    let mut start = range.start;
    while start < range.end {
        let end = range.end.min(start.saturating_add(chunk.max(1)));
        tally.merge(&sweep(start..end, line_control, config));
        debug!("Swept {}..{}, {} bad so far", start, end, tally.bad());
        start = end;
    }
    tally
}
