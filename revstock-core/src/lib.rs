//! RevStock Core — price history records, loading, filtering and KPIs.
//!
//! The crate is a pure pipeline re-run on every selection change:
//! - Loader/normalizer: CSV → date-sorted [`data::Dataset`] with derived year/month
//! - Filter engine: symbol → years → months, order preserving
//! - KPI and chart series for the latest selected trading day
//! - Dashboard view contract consumed by the CLI and TUI

pub mod config;
pub mod data;
pub mod domain;
pub mod filter;
pub mod kpi;
pub mod series;
pub mod view;

pub use config::{Config, ConfigError};
pub use data::{Dataset, LoadError, LoadOptions, MalformedRows, SchemaError, SnapshotCache};
pub use domain::Record;
pub use filter::{filter_by_symbol, filter_records, FilterError, FilteredView, Selection};
pub use kpi::{Kpi, KpiCard, Tone};
pub use view::DashboardView;
