//! Dashboard view — everything a presentation layer reads for one selection.

use chrono::Month;
use serde::Serialize;

use crate::data::Dataset;
use crate::domain::Record;
use crate::filter::{filter_records, FilterError, Selection};
use crate::kpi::Kpi;
use crate::series::{self, Candle, ScatterPoint, VolumePoint};

/// Read-only inputs for rendering a selection.
///
/// Built in full on every selection change; nothing here feeds back into
/// the core except the next [`Selection`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    /// Every symbol in the dataset, sorted (selector options).
    pub symbols: Vec<String>,
    /// Years present for the selected symbol (selector options).
    pub years: Vec<i32>,
    /// Months present for the selected symbol (selector options).
    pub months: Vec<Month>,
    /// Filtered records in chronological order.
    pub records: Vec<Record>,
    pub kpi: Kpi,
}

impl DashboardView {
    pub fn build(dataset: &Dataset, selection: &Selection) -> Result<Self, FilterError> {
        let view = filter_records(dataset.records(), selection)?;
        let kpi = view.kpi();
        Ok(Self {
            selection: selection.clone(),
            symbols: dataset.symbols(),
            years: dataset.years_for(&selection.symbol),
            months: dataset.months_for(&selection.symbol),
            records: view.into_records(),
            kpi,
        })
    }

    pub fn scatter(&self) -> Vec<ScatterPoint> {
        series::scatter_points(&self.records)
    }

    pub fn volume(&self) -> Vec<VolumePoint> {
        series::volume_points(&self.records)
    }

    pub fn candles(&self) -> Vec<Candle> {
        series::candles(&self.records)
    }
}
