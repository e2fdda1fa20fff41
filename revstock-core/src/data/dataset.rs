//! Dataset — the normalized, date-sorted, read-only price table.

use std::collections::BTreeSet;

use chrono::Month;

use crate::domain::Record;

/// Immutable snapshot of every loaded record, sorted ascending by date.
///
/// Built once by the loader and shared by reference (or `Arc`) with every
/// filter invocation. Nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    skipped_rows: usize,
    content_hash: String,
}

impl Dataset {
    /// Build a dataset, stable-sorting the records by date.
    ///
    /// Records sharing a date keep their input order.
    pub fn new(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.date);
        let content_hash = compute_content_hash(&records);
        Self {
            records,
            skipped_rows: 0,
            content_hash,
        }
    }

    pub(crate) fn with_skipped_rows(mut self, skipped: usize) -> Self {
        self.skipped_rows = skipped;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped by the skip policy for malformed rows.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// BLAKE3 hex digest over the normalized records.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Distinct symbols, sorted.
    pub fn symbols(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.symbol.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.records.iter().any(|r| r.symbol == symbol)
    }

    /// Distinct years present for `symbol`, sorted ascending.
    pub fn years_for(&self, symbol: &str) -> Vec<i32> {
        self.symbol_records(symbol)
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct months present for `symbol`, in order of first appearance.
    pub fn months_for(&self, symbol: &str) -> Vec<Month> {
        let mut months: Vec<Month> = Vec::with_capacity(12);
        for record in self.symbol_records(symbol) {
            if !months.contains(&record.month) {
                months.push(record.month);
            }
        }
        months
    }

    /// Latest year present for `symbol`.
    pub fn max_year_for(&self, symbol: &str) -> Option<i32> {
        self.symbol_records(symbol).map(|r| r.year).max()
    }

    fn symbol_records<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.symbol == symbol)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Deterministic hash covering symbol, date and every numeric field.
fn compute_content_hash(records: &[Record]) -> String {
    let mut hasher = blake3::Hasher::new();
    for r in records {
        hasher.update(r.symbol.as_bytes());
        hasher.update(r.date.to_string().as_bytes());
        hasher.update(&r.open.to_le_bytes());
        hasher.update(&r.high.to_le_bytes());
        hasher.update(&r.low.to_le_bytes());
        hasher.update(&r.close.to_le_bytes());
        hasher.update(&r.volume.to_le_bytes());
        hasher.update(&r.change.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(symbol: &str, y: i32, m: u32, d: u32, close: f64) -> Record {
        Record::new(
            symbol,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            close,
            close + 1.0,
            close - 1.0,
            close,
            100,
            0.0,
        )
    }

    #[test]
    fn sorts_by_date_and_keeps_tie_order() {
        let ds = Dataset::new(vec![
            rec("B", 2024, 3, 1, 3.0),
            rec("A", 2023, 1, 1, 1.0),
            rec("C", 2024, 3, 1, 4.0),
            rec("A", 2023, 6, 1, 2.0),
        ]);
        let closes: Vec<f64> = ds.records().iter().map(|r| r.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(ds.records()[2].symbol, "B");
        assert_eq!(ds.records()[3].symbol, "C");
    }

    #[test]
    fn symbols_are_sorted_and_distinct() {
        let ds = Dataset::new(vec![
            rec("ZZZ", 2023, 1, 2, 1.0),
            rec("ABC", 2023, 1, 3, 1.0),
            rec("ZZZ", 2023, 1, 4, 1.0),
        ]);
        assert_eq!(ds.symbols(), vec!["ABC".to_string(), "ZZZ".to_string()]);
        assert!(ds.contains_symbol("ZZZ"));
        assert!(!ds.contains_symbol("QQQ"));
    }

    #[test]
    fn scopes_are_per_symbol() {
        let ds = Dataset::new(vec![
            rec("ABC", 2023, 3, 1, 1.0),
            rec("ABC", 2023, 1, 10, 1.0),
            rec("ABC", 2024, 1, 15, 1.0),
            rec("XYZ", 2025, 7, 1, 1.0),
        ]);
        assert_eq!(ds.years_for("ABC"), vec![2023, 2024]);
        assert_eq!(ds.max_year_for("ABC"), Some(2024));
        assert_eq!(ds.months_for("ABC"), vec![Month::January, Month::March]);
        assert_eq!(ds.months_for("XYZ"), vec![Month::July]);
        assert!(ds.years_for("NONE").is_empty());
        assert_eq!(ds.max_year_for("NONE"), None);
    }

    #[test]
    fn content_hash_is_deterministic_and_sensitive() {
        let a = Dataset::new(vec![rec("ABC", 2023, 1, 2, 10.0)]);
        let b = Dataset::new(vec![rec("ABC", 2023, 1, 2, 10.0)]);
        let c = Dataset::new(vec![rec("ABC", 2023, 1, 2, 10.5)]);
        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
        assert_eq!(a.content_hash().len(), 64);
    }

    #[test]
    fn empty_dataset() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert!(ds.symbols().is_empty());
        assert_eq!(ds.skipped_rows(), 0);
    }
}
