//! Regression baselines for comparison sweeps
//!
//! The numbers are fixed by the prescaler table and the 12 MHz oscillator;
//! any change to an encoder shows up here first.

use ch341_core::compare::{compare_rate, compare_standard_rates, sweep, MAX_BAD_SAMPLES};
use ch341_core::{CompareConfig, Strategy};

#[test]
fn test_sweep_46_to_100000_baseline() {
    let tally = sweep(46..100_000, 0, &CompareConfig::default());

    assert_eq!(tally.evaluated(), 99_954);
    assert_eq!(tally.wins(Strategy::PrescalerSearch, Strategy::Legacy), 44_653);
    assert_eq!(tally.wins(Strategy::Legacy, Strategy::PrescalerSearch), 0);
    assert_eq!(tally.wins(Strategy::LegacyBypass, Strategy::Legacy), 6);
    assert_eq!(tally.wins(Strategy::Legacy, Strategy::LegacyBypass), 0);
    assert_eq!(tally.wins(Strategy::PrescalerSearch, Strategy::LegacyBypass), 44_647);
    assert_eq!(tally.wins(Strategy::LegacyBypass, Strategy::PrescalerSearch), 0);
    assert_eq!(tally.bad(), 0);
    for strategy in Strategy::ALL {
        assert_eq!(tally.failures(strategy), 0);
    }
}

#[test]
fn test_sweep_is_reproducible() {
    let config = CompareConfig::default();
    let first = sweep(40_000..50_000, 0, &config);
    let second = sweep(40_000..50_000, 0, &config);
    assert_eq!(first, second);
}

#[test]
fn test_search_error_below_one_percent_up_to_100k() {
    let mut within = 0u32;
    let mut total = 0u32;
    for baud in 46..=100_000 {
        let comparison = compare_rate(baud, 0);
        let error = comparison
            .trial(Strategy::PrescalerSearch)
            .abs_error()
            .expect("search encodes every rate in its domain");
        total += 1;
        if error < 1.0 {
            within += 1;
        }
    }
    // At least 99 %
    assert!(within * 100 >= total * 99, "{within} of {total} within 1 %");
}

#[test]
fn test_sweep_near_aliasing_boundary_is_bad() {
    // ÷1 cannot reach divisor 8.5, ÷2 jumps to 1.5 MHz
    let tally = sweep(1_400_000..1_402_000, 0, &CompareConfig::default());

    assert_eq!(tally.evaluated(), 2000);
    assert_eq!(tally.bad(), 2000);
    assert_eq!(tally.bad_samples().len(), MAX_BAD_SAMPLES);
    assert_eq!(tally.bad_samples()[0], 1_400_000);
    assert_eq!(tally.bad_samples()[MAX_BAD_SAMPLES - 1], 1_400_015);
    assert_eq!(tally.wins(Strategy::PrescalerSearch, Strategy::Legacy), 2000);
}

#[test]
fn test_bypass_window_sweep() {
    let tally = sweep(46_775..46_976, 0, &CompareConfig::default());

    assert_eq!(tally.wins(Strategy::LegacyBypass, Strategy::Legacy), 6);
    assert_eq!(tally.wins(Strategy::PrescalerSearch, Strategy::Legacy), 6);
    assert_eq!(tally.wins(Strategy::PrescalerSearch, Strategy::LegacyBypass), 0);
    assert_eq!(tally.wins(Strategy::Legacy, Strategy::LegacyBypass), 0);
}

#[test]
fn test_looser_tolerance_counts_fewer_wins() {
    let strict = sweep(46..5_000, 0, &CompareConfig::default());
    let loose = sweep(
        46..5_000,
        0,
        &CompareConfig {
            tolerance_pct: 0.5,
            ..CompareConfig::default()
        },
    );
    assert!(
        loose.wins(Strategy::PrescalerSearch, Strategy::Legacy)
            < strict.wins(Strategy::PrescalerSearch, Strategy::Legacy)
    );
}

#[test]
fn test_out_of_domain_rates_are_failures() {
    let tally = sweep(40..46, 0, &CompareConfig::default());
    assert_eq!(tally.evaluated(), 6);
    for strategy in Strategy::ALL {
        assert_eq!(tally.failures(strategy), 6);
    }
    assert_eq!(tally.bad(), 0);
}

#[test]
fn test_standard_rate_rows() {
    let rows: Vec<_> = compare_standard_rates(0).collect();
    assert_eq!(rows.len(), 43);

    let row_9600 = rows.iter().find(|r| r.requested == 9600).unwrap();
    let legacy = row_9600.trial(Strategy::Legacy).outcome.unwrap();
    let search = row_9600.trial(Strategy::PrescalerSearch).outcome.unwrap();
    assert_eq!((legacy.multiplier, legacy.divisor), (16, 78));
    assert_eq!((search.multiplier, search.divisor), (8, 156));
    assert!(search.error_percent.unwrap().abs() < 0.5);

    let row_3m = rows.last().unwrap();
    assert_eq!(row_3m.requested, 3_000_000);
    for trial in row_3m.trials.iter() {
        assert_eq!(trial.abs_error(), Some(0.0));
    }
}
