//! Candle chart panel - daily OHLC candles for the selected ticker
//!
//! Renders candlestick chart using direct buffer writes:
//! - Each candle = 1 terminal column, most recent on the right
//! - Body: block char, green if close >= open, pink otherwise
//! - Wicks: vertical line chars to high/low
//! - Bottom row: first and last visible dates

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use revstock_core::series::Candle;

use crate::theme::Theme;

/// Candle chart panel widget
pub struct CandleChartPanel<'a> {
    candles: &'a [Candle],
    symbol: &'a str,
    theme: &'a Theme,
}

impl<'a> CandleChartPanel<'a> {
    pub fn new(candles: &'a [Candle], symbol: &'a str, theme: &'a Theme) -> Self {
        Self {
            candles,
            symbol,
            theme,
        }
    }

    /// Map a price to a Y position in the plot area (0 = top)
    fn price_to_y(&self, price: f64, y_min: f64, y_max: f64, plot_height: u16) -> u16 {
        if (y_max - y_min).abs() < 1e-9 || plot_height == 0 {
            return 0;
        }
        let frac = (price - y_min) / (y_max - y_min);
        let y = plot_height.saturating_sub(1) as f64 * (1.0 - frac);
        y.round().max(0.0).min(plot_height.saturating_sub(1) as f64) as u16
    }
}

impl<'a> Widget for CandleChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.candles.is_empty() {
            let block = Block::default()
                .title(format!(" Candlestick Chart: {} [No Data] ", self.symbol))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.muted))
                .style(Style::default().bg(self.theme.background));
            block.render(area, buf);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);

        // Reserve left margin for Y-axis labels (9 chars) and bottom for dates (1 row)
        let label_width: u16 = 9;
        let plot_left = inner.x + label_width;
        let plot_top = inner.y;
        let plot_width = inner.width.saturating_sub(label_width);
        let plot_height = inner.height.saturating_sub(1);

        // Only the most recent candles that fit are drawn; bounds and counts
        // follow what is visible.
        let visible = self.candles.len().min(plot_width.max(1) as usize);
        let shown = &self.candles[self.candles.len() - visible..];

        let up_count = shown.iter().filter(|c| c.is_up()).count();
        let down_count = shown.len() - up_count;
        let title = format!(
            " Candlestick Chart: {} | {} bars | {} up {} down ",
            self.symbol,
            shown.len(),
            up_count,
            down_count,
        );
        block
            .title(title)
            .title_style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .render(area, buf);

        if plot_width == 0 || plot_height == 0 {
            return;
        }

        let y_min = shown.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let y_max = shown.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);

        // Add padding
        let range = y_max - y_min;
        let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
        let y_lower = y_min - pad;
        let y_upper = y_max + pad;

        // Draw Y-axis labels
        let y_labels = [y_upper, (y_upper + y_lower) / 2.0, y_lower];
        let y_positions = [0u16, plot_height / 2, plot_height.saturating_sub(1)];
        for (label_val, y_pos) in y_labels.iter().zip(y_positions.iter()) {
            let label = format!("{:>8.2}", label_val);
            let y = plot_top + y_pos;
            if y < inner.y + inner.height {
                buf.set_string(inner.x, y, &label, Style::default().fg(self.theme.muted));
            }
        }

        for (i, candle) in shown.iter().enumerate() {
            let x = plot_left + i as u16;
            if x >= inner.right() {
                break;
            }

            let is_up = candle.is_up();
            let color = if is_up {
                self.theme.positive
            } else {
                self.theme.negative
            };
            let style = Style::default().fg(color);

            let high_y = self.price_to_y(candle.high, y_lower, y_upper, plot_height);
            let low_y = self.price_to_y(candle.low, y_lower, y_upper, plot_height);
            let body_top_y =
                self.price_to_y(candle.open.max(candle.close), y_lower, y_upper, plot_height);
            let body_bot_y =
                self.price_to_y(candle.open.min(candle.close), y_lower, y_upper, plot_height);

            // Upper wick
            for y in high_y..body_top_y {
                buf.set_string(x, plot_top + y, "|", style);
            }

            let body_char = if is_up { "\u{2588}" } else { "\u{2593}" }; // full block vs medium shade
            for y in body_top_y..=body_bot_y {
                buf.set_string(x, plot_top + y, body_char, style);
            }

            // Lower wick
            for y in (body_bot_y + 1)..=low_y {
                buf.set_string(x, plot_top + y, "|", style);
            }
        }

        // Date range under the plot
        let info_y = plot_top + plot_height;
        if info_y < inner.bottom() {
            let first = shown[0].date.format("%Y-%m-%d").to_string();
            let last = shown[shown.len() - 1].date.format("%Y-%m-%d").to_string();
            let muted = Style::default().fg(self.theme.muted);
            buf.set_string(plot_left, info_y, &first, muted);
            let right_x = inner.right().saturating_sub(last.len() as u16);
            if right_x > plot_left + first.len() as u16 {
                buf.set_string(right_x, info_y, &last, muted);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::buffer_text;
    use chrono::NaiveDate;

    fn candle(day: u32, open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open,
            high,
            low,
            close,
        }
    }

    fn make_test_candles() -> Vec<Candle> {
        vec![
            candle(2, 100.0, 102.0, 99.0, 101.0),  // up
            candle(3, 101.0, 103.0, 100.0, 100.5), // down
            candle(4, 100.5, 104.0, 99.5, 103.0),  // up
            candle(5, 103.0, 105.0, 101.0, 102.0), // down
            candle(8, 102.0, 106.0, 101.5, 105.5), // up
        ]
    }

    fn render(candles: &[Candle], width: u16, height: u16) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        CandleChartPanel::new(candles, "SPY", &theme).render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_candle_chart_renders_title_and_dates() {
        let content = render(&make_test_candles(), 80, 24);
        assert!(content.contains("SPY | 5 bars | 3 up 2 down"));
        assert!(content.contains("2024-01-02"));
        assert!(content.contains("2024-01-08"));
    }

    #[test]
    fn test_candle_chart_empty_candles() {
        let content = render(&[], 80, 24);
        assert!(content.contains("No Data"));
    }

    #[test]
    fn test_up_and_down_bodies_use_distinct_glyphs() {
        let content = render(&make_test_candles(), 80, 24);
        assert!(content.contains('\u{2588}'));
        assert!(content.contains('\u{2593}'));
    }

    #[test]
    fn test_narrow_area_keeps_most_recent_candles() {
        // 2 border + 9 label columns leaves 3 plot columns.
        let theme = Theme::default();
        let candles = make_test_candles();
        let area = Rect::new(0, 0, 14, 12);
        let mut buf = Buffer::empty(area);
        CandleChartPanel::new(&candles, "SPY", &theme).render(area, &mut buf);

        let glyph_columns = (0..area.width)
            .filter(|&x| {
                (0..area.height).any(|y| {
                    matches!(
                        buf.cell((x, y)).map(|c| c.symbol()),
                        Some("|") | Some("\u{2588}") | Some("\u{2593}")
                    )
                })
            })
            .count();
        assert_eq!(glyph_columns, 3);
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        render(&make_test_candles(), 4, 3);
        render(&make_test_candles(), 0, 0);
    }

    #[test]
    fn test_flat_prices_render() {
        let flat = vec![candle(2, 10.0, 10.0, 10.0, 10.0); 3];
        let content = render(&flat, 60, 10);
        assert!(content.contains("3 up 0 down"));

        // Each flat candle is a one-row body with no wicks.
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        CandleChartPanel::new(&flat, "SPY", &theme).render(area, &mut buf);
        let mut bodies = Vec::new();
        // Row 0 holds the title, whose separators are also '|'.
        for y in 1..area.height - 1 {
            for x in 1..area.width - 1 {
                match buf.cell((x, y)).map(|c| c.symbol()) {
                    Some("\u{2588}") => bodies.push((x, y)),
                    Some("|") => panic!("unexpected wick at ({x}, {y})"),
                    _ => {}
                }
            }
        }
        assert_eq!(bodies.len(), 3);
        assert!(bodies.iter().all(|&(_, y)| y == bodies[0].1));
    }

    #[test]
    fn test_price_to_y_maps_extremes() {
        let theme = Theme::default();
        let panel = CandleChartPanel::new(&[], "SPY", &theme);
        assert_eq!(panel.price_to_y(110.0, 90.0, 110.0, 11), 0);
        assert_eq!(panel.price_to_y(90.0, 90.0, 110.0, 11), 10);
        assert_eq!(panel.price_to_y(100.0, 90.0, 110.0, 11), 5);
    }
}
