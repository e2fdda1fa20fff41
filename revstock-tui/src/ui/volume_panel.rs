//! "Historical Volume" — daily volume in millions over time.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset as ChartDataset, GraphType};

use revstock_core::series::{self, VolumePoint};
use revstock_core::DashboardView;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, view: &DashboardView) {
    let points = view.volume();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return;
    };

    let data = to_xy(&points);
    let x_max = data.last().map(|(x, _)| *x).unwrap_or(0.0).max(1.0);
    let y_max = series::bounds(points.iter().map(|p| p.volume_millions))
        .map(|(_, hi)| hi)
        .unwrap_or(0.0);
    let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let dataset = ChartDataset::default()
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(" Historical Volume ")
        .title_style(theme::accent_bold());

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(first.date.format("%Y-%m-%d").to_string(), theme::muted()),
                    Span::styled(last.date.format("%Y-%m-%d").to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Volume (M)", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, y_top])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled(format!("{y_top:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// Days since the first point on x, millions on y.
fn to_xy(points: &[VolumePoint]) -> Vec<(f64, f64)> {
    let Some(origin) = points.first().map(|p| p.date) else {
        return Vec::new();
    };
    points
        .iter()
        .map(|p| ((p.date - origin).num_days() as f64, p.volume_millions))
        .collect()
}
