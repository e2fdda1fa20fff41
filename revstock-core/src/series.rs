//! Chart series derived from a filtered view.
//!
//! Three feeds, one per dashboard chart:
//! - scatter: high (x) against low (y), sized by |change|, coloured by close
//! - volume: daily volume in millions over time
//! - candles: OHLC per trading day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Record;

/// Marker size per unit of absolute price change.
pub const SCATTER_SIZE_FACTOR: f64 = 5.0;

/// Volume axis unit.
pub const VOLUME_UNIT: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub high: f64,
    pub low: f64,
    pub size: f64,
    pub color_value: f64,
    /// Date as `YYYY-MM-DD`.
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub volume_millions: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

pub fn scatter_points(records: &[Record]) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|r| ScatterPoint {
            high: r.high,
            low: r.low,
            size: r.change.abs() * SCATTER_SIZE_FACTOR,
            color_value: r.close,
            label: r.date.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

pub fn volume_points(records: &[Record]) -> Vec<VolumePoint> {
    records
        .iter()
        .map(|r| VolumePoint {
            date: r.date,
            volume_millions: r.volume as f64 / VOLUME_UNIT,
        })
        .collect()
}

pub fn candles(records: &[Record]) -> Vec<Candle> {
    records
        .iter()
        .map(|r| Candle {
            date: r.date,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
        })
        .collect()
}

/// Inclusive min/max over `values`, `None` when empty.
pub fn bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
