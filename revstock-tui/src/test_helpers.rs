//! Test helpers: sample datasets and buffer inspection.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use revstock_core::{Dataset, LoadOptions, Record, SnapshotCache};

use crate::app::{AppState, Source};

pub fn sample_dataset() -> Dataset {
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
    Dataset::new(vec![
        Record::new("ABC", d(2023, 1, 10), 10.0, 12.0, 9.0, 11.0, 1_000_000, 1.0),
        Record::new("ABC", d(2023, 2, 5), 11.0, 13.0, 10.0, 12.0, 1_500_000, 1.0),
        Record::new("ABC", d(2024, 1, 15), 12.0, 14.0, 11.0, 13.0, 2_000_000, -0.5),
        Record::new("XYZ", d(2023, 3, 1), 50.0, 52.0, 49.0, 51.0, 300_000, 0.4),
    ])
}

pub fn sample_source() -> Source {
    Source {
        path: PathBuf::from("unused.csv"),
        options: LoadOptions::default(),
    }
}

pub fn sample_app() -> AppState {
    AppState::with_dataset(
        sample_source(),
        SnapshotCache::new(),
        Arc::new(sample_dataset()),
        None,
    )
}

/// Flatten a buffer into one string, row by row.
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut content = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                content.push_str(cell.symbol());
            }
        }
        content.push('\n');
    }
    content
}

/// Draw into an off-screen terminal and return the rendered text.
pub fn render_to_string(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    buffer_text(terminal.backend().buffer())
}
