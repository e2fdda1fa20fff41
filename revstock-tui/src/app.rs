//! Application state — single-owner, main-thread only.
//!
//! The dashboard is a pure function of (dataset, selection): every change to
//! the ticker, years or months rebuilds the [`DashboardView`] from scratch.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Month;
use tracing::{debug, warn};

use revstock_core::{
    DashboardView, Dataset, FilterError, LoadError, LoadOptions, Selection, SnapshotCache,
};

pub const NO_DATA_MESSAGE: &str = "No data available for selected filters.";

/// Which sidebar list receives j/k/Space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Years,
    Months,
}

impl Focus {
    pub fn label(self) -> &'static str {
        match self {
            Focus::Years => "Year",
            Focus::Months => "Month",
        }
    }

    pub fn next(self) -> Focus {
        match self {
            Focus::Years => Focus::Months,
            Focus::Months => Focus::Years,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

/// Where the dashboard reads its data from.
#[derive(Debug, Clone)]
pub struct Source {
    pub path: PathBuf,
    pub options: LoadOptions,
}

pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,

    pub source: Source,
    cache: SnapshotCache,
    pub dataset: Arc<Dataset>,

    /// Ticker selector options, sorted.
    pub symbols: Vec<String>,
    pub symbol_idx: usize,
    /// Year/Month options for the current ticker.
    pub years: Vec<i32>,
    pub months: Vec<Month>,
    pub year_cursor: usize,
    pub month_cursor: usize,

    /// `None` only when the dataset has no symbols at all.
    pub selection: Option<Selection>,
    pub view: Option<Result<DashboardView, FilterError>>,
}

impl AppState {
    /// Load the source through a fresh snapshot cache and select the
    /// starting ticker.
    pub fn load(source: Source, default_symbol: Option<&str>) -> Result<Self, LoadError> {
        let mut cache = SnapshotCache::new();
        let dataset = cache.get_or_load(&source.path, &source.options)?;
        Ok(Self::with_dataset(source, cache, dataset, default_symbol))
    }

    pub fn with_dataset(
        source: Source,
        cache: SnapshotCache,
        dataset: Arc<Dataset>,
        default_symbol: Option<&str>,
    ) -> Self {
        let symbols = dataset.symbols();
        let mut app = Self {
            running: true,
            focus: Focus::Years,
            overlay: Overlay::None,
            status_message: None,
            source,
            cache,
            dataset,
            symbols,
            symbol_idx: 0,
            years: Vec::new(),
            months: Vec::new(),
            year_cursor: 0,
            month_cursor: 0,
            selection: None,
            view: None,
        };

        let start = default_symbol
            .and_then(|s| app.symbols.iter().position(|sym| sym == s))
            .unwrap_or(0);
        if let Some(wanted) = default_symbol {
            if !app.symbols.iter().any(|s| s == wanted) {
                app.set_warning(format!("Default symbol '{wanted}' not in dataset"));
            }
        }
        app.select_symbol(start);
        if app.dataset.skipped_rows() > 0 {
            app.set_warning(format!(
                "Skipped {} malformed row(s)",
                app.dataset.skipped_rows()
            ));
        }
        app
    }

    pub fn selected_symbol(&self) -> Option<&str> {
        self.symbols.get(self.symbol_idx).map(String::as_str)
    }

    /// Switch ticker and reset years/months to that ticker's defaults.
    pub fn select_symbol(&mut self, idx: usize) {
        let Some(symbol) = self.symbols.get(idx).cloned() else {
            self.selection = None;
            self.view = None;
            self.years.clear();
            self.months.clear();
            return;
        };
        self.symbol_idx = idx;
        self.years = self.dataset.years_for(&symbol);
        self.months = self.dataset.months_for(&symbol);
        self.year_cursor = 0;
        self.month_cursor = 0;
        self.selection = Some(Selection::defaults_for(&self.dataset, &symbol));
        self.recompute();
    }

    pub fn next_symbol(&mut self) {
        if self.symbols.is_empty() {
            return;
        }
        self.select_symbol((self.symbol_idx + 1) % self.symbols.len());
    }

    pub fn prev_symbol(&mut self) {
        if self.symbols.is_empty() {
            return;
        }
        let n = self.symbols.len();
        self.select_symbol((self.symbol_idx + n - 1) % n);
    }

    /// Number of items in the focused list.
    fn focused_len(&self) -> usize {
        match self.focus {
            Focus::Years => self.years.len(),
            Focus::Months => self.months.len(),
        }
    }

    fn focused_cursor(&mut self) -> &mut usize {
        match self.focus {
            Focus::Years => &mut self.year_cursor,
            Focus::Months => &mut self.month_cursor,
        }
    }

    pub fn cursor_down(&mut self) {
        let len = self.focused_len();
        let cursor = self.focused_cursor();
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        let cursor = self.focused_cursor();
        *cursor = cursor.saturating_sub(1);
    }

    /// Toggle the year or month under the cursor.
    pub fn toggle_at_cursor(&mut self) {
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        match self.focus {
            Focus::Years => match self.years.get(self.year_cursor) {
                Some(&year) => selection.toggle_year(year),
                None => return,
            },
            Focus::Months => match self.months.get(self.month_cursor) {
                Some(&month) => selection.toggle_month(month),
                None => return,
            },
        }
        self.recompute();
    }

    /// Select every option in the focused list.
    pub fn select_all(&mut self) {
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        match self.focus {
            Focus::Years => selection.years = self.years.iter().copied().collect(),
            Focus::Months => selection.months = self.months.clone(),
        }
        self.recompute();
    }

    pub fn reset_defaults(&mut self) {
        self.select_symbol(self.symbol_idx);
        self.set_status("Filters reset to defaults");
    }

    /// Rebuild the view for the current selection.
    pub fn recompute(&mut self) {
        let Some(selection) = &self.selection else {
            self.view = None;
            return;
        };
        let result = DashboardView::build(&self.dataset, selection);
        match &result {
            Ok(view) => debug!(
                symbol = %selection.symbol,
                rows = view.records.len(),
                "dashboard view rebuilt"
            ),
            Err(err) => debug!(%err, "empty selection"),
        }
        self.view = Some(result);
    }

    /// Re-read the source if it changed on disk, keeping the current ticker
    /// when it still exists.
    pub fn reload(&mut self) {
        let dataset = match self.cache.get_or_load(&self.source.path, &self.source.options) {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(%err, "reload failed");
                self.set_error(format!("Reload failed: {err}"));
                return;
            }
        };

        if Arc::ptr_eq(&dataset, &self.dataset) {
            self.set_status("Data unchanged");
            return;
        }

        let current = self.selected_symbol().map(str::to_string);
        self.dataset = dataset;
        self.symbols = self.dataset.symbols();
        let idx = current
            .and_then(|s| self.symbols.iter().position(|sym| *sym == s))
            .unwrap_or(0);
        self.select_symbol(idx);
        let hash = self.dataset.content_hash();
        self.set_status(format!(
            "Reloaded {} rows ({})",
            self.dataset.len(),
            &hash[..hash.len().min(12)]
        ));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
