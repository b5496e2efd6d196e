//! Text report
//!
//! Informational output only; the exact layout is not a stable format.

use std::fmt::Write;
use std::ops::Range;

use ch341_core::{ComparisonTally, RateComparison, Strategy, Trial};

/// Header printed above the standard rate rows
pub fn rate_header() -> String {
    let mut line = String::from("baud     ");
    for strategy in Strategy::ALL {
        let _ = write!(line, "\t{:>8}", strategy.name());
    }
    for strategy in Strategy::ALL {
        let _ = write!(line, "\t{:>8}", format!("{}:m/d", strategy.name()));
    }
    line
}

/// One row: signed error then multiplier/divisor per strategy
pub fn rate_row(comparison: &RateComparison) -> String {
    let mut line = format!("baud={:<8}", comparison.requested);
    for trial in comparison.trials.iter() {
        let _ = write!(line, "\t{}={}", trial.strategy.name(), error_cell(trial));
    }
    for trial in comparison.trials.iter() {
        let _ = write!(line, "\t{}={}", trial.strategy.name(), divider_cell(trial));
    }
    line
}

/// Signed error with two decimals, `n/a` for rejected or undecodable
fn error_cell(trial: &Trial) -> String {
    match trial.outcome {
        Ok(result) => match result.error_percent {
            Some(error) => format!("{:+.2}%", error),
            None => "n/a".to_string(),
        },
        Err(_) => "n/a".to_string(),
    }
}

fn divider_cell(trial: &Trial) -> String {
    match trial.outcome {
        Ok(result) => format!("{}/{}", result.multiplier, result.divisor),
        Err(_) => "-/-".to_string(),
    }
}

/// One line for a finished sweep
pub fn sweep_summary(range: &Range<u32>, tally: &ComparisonTally) -> String {
    let mut line = format!(
        "sweep {}..{}: evaluated={}",
        range.start,
        range.end,
        tally.evaluated()
    );

    for (i, &a) in Strategy::ALL.iter().enumerate() {
        for &b in Strategy::ALL.iter().skip(i + 1) {
            let _ = write!(
                line,
                " {}>{}={} {}>{}={}",
                a.name(),
                b.name(),
                tally.wins(a, b),
                b.name(),
                a.name(),
                tally.wins(b, a)
            );
        }
    }

    let config = tally.config();
    let _ = write!(
        line,
        " bad[{}>{:.2}%]={}",
        config.reference.name(),
        config.bad_threshold_pct,
        tally.bad()
    );

    let failures: Vec<String> = Strategy::ALL
        .iter()
        .map(|&s| format!("{}:{}", s.name(), tally.failures(s)))
        .collect();
    let _ = write!(line, " failures={}", failures.join(","));

    line
}

/// Full detail for one trial: rates, error and both views of the registers
pub fn trial_detail(baud: u32, trial: &Trial) -> String {
    match trial.outcome {
        Ok(result) => {
            let error = match result.error_percent {
                Some(error) => format!("{:+.2}%", error),
                None => "n/a".to_string(),
            };
            format!(
                "{}: baud={} real_baud={:.3} error={} pre_reg=0x{:02x} div_reg=0x{:02x} pre={} div={}",
                trial.strategy.name(),
                baud,
                result.achieved_hz,
                error,
                result.registers.prescaler,
                result.registers.divisor,
                result.multiplier,
                result.divisor
            )
        }
        Err(err) => format!("{}: baud={} rejected ({:?})", trial.strategy.name(), baud, err),
    }
}
