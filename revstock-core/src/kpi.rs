//! Headline KPIs for the latest trading day of a selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Record;

/// Open/high/low/close of the latest record in a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Display hint for a KPI card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
}

/// A titled, formatted KPI value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub tone: Tone,
}

impl Kpi {
    pub fn from_record(record: &Record) -> Self {
        Self {
            date: record.date,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
        }
    }

    /// KPI of the last record of a chronologically ordered slice.
    pub fn latest(records: &[Record]) -> Option<Self> {
        records.last().map(Self::from_record)
    }

    /// The four cards in display order: Open, High, Low, Close.
    pub fn cards(&self) -> [KpiCard; 4] {
        [
            card("Open", self.open, Tone::Neutral),
            card("High", self.high, Tone::Positive),
            card("Low", self.low, Tone::Negative),
            card("Close", self.close, Tone::Neutral),
        ]
    }
}

fn card(title: &'static str, value: f64, tone: Tone) -> KpiCard {
    KpiCard {
        title,
        value: format_price(value),
        tone,
    }
}

/// Dollar price with two decimals, e.g. `$12.50`.
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}
