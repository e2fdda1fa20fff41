//! Record — one trading day for one symbol.

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar months indexed by `NaiveDate::month0()`.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Month of a date as a `chrono::Month`.
pub fn month_of(date: NaiveDate) -> Month {
    MONTHS[date.month0() as usize]
}

/// Daily OHLCV record for a single symbol.
///
/// `year` and `month` are derived from `date` at construction and never
/// diverge from it; build records through [`Record::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub change: f64,
    pub year: i32,
    pub month: Month,
}

impl Record {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        change: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            open,
            high,
            low,
            close,
            volume,
            change,
            year: date.year(),
            month: month_of(date),
        }
    }

    /// Full English month name, e.g. "February".
    pub fn month_name(&self) -> &'static str {
        self.month.name()
    }
}
