//! Filter engine — symbol, then year, then month.
//!
//! Every step keeps records in their input order, so a view built from a
//! date-sorted dataset stays date-sorted and its last record is the latest
//! trading day of the selection.

use std::collections::BTreeSet;

use chrono::Month;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::Dataset;
use crate::domain::Record;
use crate::kpi::Kpi;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("No data available for selected filters (symbol '{symbol}').")]
    EmptyResult { symbol: String },
}

/// A user selection: one symbol, a set of years, a set of months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub symbol: String,
    pub years: BTreeSet<i32>,
    /// Month order is kept for display; membership is what filters.
    pub months: Vec<Month>,
}

impl Selection {
    pub fn new(
        symbol: impl Into<String>,
        years: impl IntoIterator<Item = i32>,
        months: impl IntoIterator<Item = Month>,
    ) -> Self {
        let mut selection = Self {
            symbol: symbol.into(),
            years: years.into_iter().collect(),
            months: Vec::new(),
        };
        for month in months {
            selection.insert_month(month);
        }
        selection
    }

    /// Default selection for `symbol`: the latest year present, and every
    /// month present, in first-appearance order.
    ///
    /// A symbol absent from the dataset gets empty year/month sets, which the
    /// filter reports as an empty result.
    pub fn defaults_for(dataset: &Dataset, symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            years: dataset.max_year_for(symbol).into_iter().collect(),
            months: dataset.months_for(symbol),
        }
    }

    pub fn has_year(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn has_month(&self, month: Month) -> bool {
        self.months.contains(&month)
    }

    pub fn toggle_year(&mut self, year: i32) {
        if !self.years.remove(&year) {
            self.years.insert(year);
        }
    }

    pub fn toggle_month(&mut self, month: Month) {
        if let Some(pos) = self.months.iter().position(|m| *m == month) {
            self.months.remove(pos);
        } else {
            self.months.push(month);
        }
    }

    fn insert_month(&mut self, month: Month) {
        if !self.months.contains(&month) {
            self.months.push(month);
        }
    }

    fn matches(&self, record: &Record) -> bool {
        record.symbol == self.symbol && self.has_year(record.year) && self.has_month(record.month)
    }
}

/// Non-empty, order-preserving result of a filter run.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    records: Vec<Record>,
}

impl FilteredView {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The chronologically last record of the selection.
    pub fn latest(&self) -> &Record {
        // A view is never constructed empty.
        &self.records[self.records.len() - 1]
    }

    pub fn kpi(&self) -> Kpi {
        Kpi::from_record(self.latest())
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Records of one symbol, in input order.
pub fn filter_by_symbol(records: &[Record], symbol: &str) -> Vec<Record> {
    records.iter().filter(|r| r.symbol == symbol).cloned().collect()
}

/// Apply the symbol, year and month filters, in that order.
///
/// Returns [`FilterError::EmptyResult`] when nothing survives; callers must
/// stop there rather than compute KPIs or series.
pub fn filter_records(records: &[Record], selection: &Selection) -> Result<FilteredView, FilterError> {
    let filtered: Vec<Record> = records
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect();

    debug!(
        symbol = %selection.symbol,
        years = selection.years.len(),
        months = selection.months.len(),
        rows = filtered.len(),
        "filter applied"
    );

    if filtered.is_empty() {
        return Err(FilterError::EmptyResult {
            symbol: selection.symbol.clone(),
        });
    }
    Ok(FilteredView { records: filtered })
}
