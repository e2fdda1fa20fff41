//! Top-level UI layout — KPI row, filter sidebar, chart grid, status bar.
//!
//! ```text
//! ┌ticker┐┌Open┐┌High┐┌Low┐┌Close┐
//! ┌Year─┐┌scatter──────┐┌candles──┐
//! │     │└─────────────┘│         │
//! ┌Month┐┌volume───────┐│         │
//! └─────┘└─────────────┘└─────────┘
//!  status bar
//! ```

pub mod filter_panel;
pub mod help_panel;
pub mod kpi_bar;
pub mod scatter_panel;
pub mod status_bar;
pub mod volume_panel;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use revstock_core::DashboardView;

use crate::app::{AppState, Overlay, NO_DATA_MESSAGE};
use crate::panels::CandleChartPanel;
use crate::theme::{self, Theme};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    kpi_bar::render(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(20)])
        .split(chunks[1]);

    filter_panel::render(f, body[0], app);
    draw_charts(f, body[1], app);

    status_bar::render(f, chunks[2], app);

    if app.overlay == Overlay::Help {
        help_panel::render(f, chunks[1]);
    }
}

fn draw_charts(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.view {
        Some(Ok(view)) => draw_chart_grid(f, area, app, view),
        Some(Err(_)) => render_message(f, area, NO_DATA_MESSAGE),
        None => render_message(f, area, "Dataset is empty. Press r to reload."),
    }
}

fn draw_chart_grid(f: &mut Frame, area: Rect, app: &AppState, view: &DashboardView) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    scatter_panel::render(f, left[0], view);
    volume_panel::render(f, left[1], view);

    let candles = view.candles();
    let symbol = app.selected_symbol().unwrap_or_default();
    let theme = Theme::default();
    f.render_widget(CandleChartPanel::new(&candles, symbol, &theme), columns[1]);
}

/// Bordered warning box with a centered message.
pub fn render_message(f: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::warning());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let top_pad = inner.height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(message.to_string(), theme::warning())));
    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, inner);
}

/// Axis bounds with 5% padding; a flat range is widened by one unit.
pub fn padded_bounds(lo: f64, hi: f64) -> [f64; 2] {
    let range = hi - lo;
    if range.abs() < 1e-9 {
        [lo - 1.0, hi + 1.0]
    } else {
        let pad = range * 0.05;
        [lo - pad, hi + pad]
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
