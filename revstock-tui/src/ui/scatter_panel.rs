//! "High vs Low Comparison" — daily high (x) against daily low (y).
//!
//! Terminal cells have no marker size or continuous color, so points are
//! bucketed: three color bands over the closing-price range and two marker
//! glyphs split on the scatter size.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset as ChartDataset, GraphType};

use revstock_core::series::{self, ScatterPoint};
use revstock_core::DashboardView;

use crate::theme::{self, Theme};
use crate::ui::padded_bounds;

/// Scatter size from which a point is drawn with the large glyph
/// (an absolute daily change of 1.0 or more).
pub const LARGE_MARKER_SIZE: f64 = 5.0;

const COLOR_BANDS: usize = 3;

pub fn render(f: &mut Frame, area: Rect, view: &DashboardView) {
    let points = view.scatter();
    let theme = Theme::default();

    let (Some((x_lo, x_hi)), Some((y_lo, y_hi)), Some((c_lo, c_hi))) = (
        series::bounds(points.iter().map(|p| p.high)),
        series::bounds(points.iter().map(|p| p.low)),
        series::bounds(points.iter().map(|p| p.color_value)),
    ) else {
        return;
    };

    let groups = bucket_points(&points, c_lo, c_hi);
    let datasets: Vec<ChartDataset> = groups
        .iter()
        .enumerate()
        .filter(|(_, data)| !data.is_empty())
        .map(|(i, data)| {
            let band = i / 2;
            let large = i % 2 == 1;
            ChartDataset::default()
                .marker(if large { Marker::Block } else { Marker::Dot })
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(theme.scale_color(band as f64 / (COLOR_BANDS - 1) as f64)))
                .data(data)
        })
        .collect();

    let x_bounds = padded_bounds(x_lo, x_hi);
    let y_bounds = padded_bounds(y_lo, y_hi);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(
            " High vs Low Comparison | close {c_lo:.2}..{c_hi:.2} "
        ))
        .title_style(theme::accent_bold());

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("High", theme::muted()))
                .style(theme::muted())
                .bounds(x_bounds)
                .labels(vec![
                    Span::styled(format!("{:.2}", x_bounds[0]), theme::muted()),
                    Span::styled(format!("{:.2}", x_bounds[1]), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Low", theme::muted()))
                .style(theme::muted())
                .bounds(y_bounds)
                .labels(vec![
                    Span::styled(format!("{:.2}", y_bounds[0]), theme::muted()),
                    Span::styled(format!("{:.2}", y_bounds[1]), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// Group `(high, low)` pairs by color band and marker size.
/// Index is `band * 2 + large`.
fn bucket_points(points: &[ScatterPoint], c_lo: f64, c_hi: f64) -> Vec<Vec<(f64, f64)>> {
    let mut groups = vec![Vec::new(); COLOR_BANDS * 2];
    for p in points {
        let band = color_band(p.color_value, c_lo, c_hi);
        let large = usize::from(p.size >= LARGE_MARKER_SIZE);
        groups[band * 2 + large].push((p.high, p.low));
    }
    groups
}

fn color_band(value: f64, lo: f64, hi: f64) -> usize {
    let range = hi - lo;
    if range.abs() < 1e-9 {
        return COLOR_BANDS / 2;
    }
    let t = ((value - lo) / range).clamp(0.0, 1.0);
    ((t * COLOR_BANDS as f64) as usize).min(COLOR_BANDS - 1)
}
