//! Property tests for loader and filter invariants.
//!
//! Uses proptest to verify:
//! 1. Datasets are sorted non-decreasing by date
//! 2. Year and month are derived from the date
//! 3. Symbol filtering is idempotent
//! 4. Full year + month sets are the identity over the symbol slice
//! 5. The KPI is the OHLC of the last filtered record
//! 6. A year with no rows yields EmptyResult

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use revstock_core::domain::Record;
use revstock_core::{filter_by_symbol, filter_records, Dataset, FilterError, Selection};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_symbol() -> impl Strategy<Value = String> {
    prop_oneof![Just("ABC"), Just("XYZ"), Just("QQQ")].prop_map(String::from)
}

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        arb_symbol(),
        0i64..2_000,
        arb_price(),
        arb_price(),
        0u64..10_000_000,
        -20.0..20.0_f64,
    )
        .prop_map(|(symbol, offset, a, b, volume, change)| {
            let base = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
            let date = base + Duration::days(offset);
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            Record::new(symbol, date, low, high, low, high, volume, change)
        })
}

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(arb_record(), 0..120).prop_map(Dataset::new)
}

fn full_selection(ds: &Dataset, symbol: &str) -> Selection {
    Selection::new(symbol, ds.years_for(symbol), ds.months_for(symbol))
}

proptest! {
    #[test]
    fn dataset_is_sorted_by_date(ds in arb_dataset()) {
        prop_assert!(ds.records().windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn derived_fields_follow_date(record in arb_record()) {
        prop_assert_eq!(record.year, record.date.year());
        prop_assert_eq!(record.month.number_from_month(), record.date.month());
        prop_assert_eq!(record.month_name(), record.date.format("%B").to_string());
    }

    #[test]
    fn symbol_filter_is_idempotent(ds in arb_dataset(), symbol in arb_symbol()) {
        let once = filter_by_symbol(ds.records(), &symbol);
        let twice = filter_by_symbol(&once, &symbol);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn full_scopes_are_identity(ds in arb_dataset(), symbol in arb_symbol()) {
        let by_symbol = filter_by_symbol(ds.records(), &symbol);
        let selection = full_selection(&ds, &symbol);
        match filter_records(ds.records(), &selection) {
            Ok(view) => prop_assert_eq!(view.records(), by_symbol.as_slice()),
            Err(FilterError::EmptyResult { .. }) => prop_assert!(by_symbol.is_empty()),
        }
    }

    #[test]
    fn kpi_is_last_record(ds in arb_dataset(), symbol in arb_symbol()) {
        let selection = Selection::defaults_for(&ds, &symbol);
        if let Ok(view) = filter_records(ds.records(), &selection) {
            let last = view.records().last().unwrap();
            let kpi = view.kpi();
            prop_assert_eq!(
                (kpi.open, kpi.high, kpi.low, kpi.close),
                (last.open, last.high, last.low, last.close)
            );
            prop_assert!(view.records().iter().all(|r| r.date <= kpi.date));
        }
    }

    #[test]
    fn absent_year_is_empty_result(ds in arb_dataset(), symbol in arb_symbol()) {
        let months = ds.months_for(&symbol);
        let selection = Selection::new(symbol.clone(), [1999], months);
        prop_assert_eq!(
            filter_records(ds.records(), &selection).unwrap_err(),
            FilterError::EmptyResult { symbol }
        );
    }

    #[test]
    fn filtered_view_is_a_subsequence(ds in arb_dataset(), symbol in arb_symbol()) {
        let selection = Selection::defaults_for(&ds, &symbol);
        if let Ok(view) = filter_records(ds.records(), &selection) {
            let mut source = ds.records().iter();
            for r in view.records() {
                prop_assert!(source.any(|s| s == r));
            }
        }
    }
}
