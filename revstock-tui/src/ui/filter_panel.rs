//! Sidebar — Year and Month multiselects for the current ticker.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Focus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    // Years are few; give months the larger share.
    let year_rows = (app.years.len() as u16 + 2).max(3).min((area.height / 2).max(3));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(year_rows), Constraint::Min(3)])
        .split(area);

    let selection = app.selection.as_ref();

    let year_items: Vec<(String, bool)> = app
        .years
        .iter()
        .map(|&y| (y.to_string(), selection.is_some_and(|s| s.has_year(y))))
        .collect();
    let month_items: Vec<(String, bool)> = app
        .months
        .iter()
        .map(|&m| (m.name().to_string(), selection.is_some_and(|s| s.has_month(m))))
        .collect();

    render_list(f, chunks[0], Focus::Years, &year_items, app.year_cursor, app.focus);
    render_list(f, chunks[1], Focus::Months, &month_items, app.month_cursor, app.focus);
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    list: Focus,
    items: &[(String, bool)],
    cursor: usize,
    focus: Focus,
) {
    let active = list == focus;
    let selected = items.iter().filter(|(_, on)| *on).count();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(format!(" {} {}/{} ", list.label(), selected, items.len()))
        .title_style(theme::panel_title(active));

    let inner = block.inner(area);
    f.render_widget(block, area);

    // Keep the cursor row visible.
    let height = inner.height as usize;
    let offset = if height > 0 && cursor >= height {
        cursor + 1 - height
    } else {
        0
    };

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, (label, on))| {
            let is_cursor = active && i == cursor;
            let marker = if is_cursor { ">" } else { " " };
            let check = if *on { "[x]" } else { "[ ]" };
            let mut style = if *on { theme::accent() } else { theme::muted() };
            if is_cursor {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Line::from(vec![
                Span::styled(marker, theme::accent_bold()),
                Span::styled(format!("{check} {label}"), style),
            ])
        })
        .collect();

    let para = Paragraph::new(lines).style(Style::default().bg(theme::BACKGROUND));
    f.render_widget(para, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{render_to_string, sample_app};

    #[test]
    fn marks_default_selection() {
        let app = sample_app();
        let text = render_to_string(22, 20, |f| render(f, f.area(), &app));
        assert!(text.contains("[ ] 2023"));
        assert!(text.contains("[x] 2024"));
        assert!(text.contains("[x] January"));
        assert!(text.contains("[x] February"));
        assert!(text.contains("Year 1/2"));
        assert!(text.contains("Month 2/2"));
    }

    #[test]
    fn cursor_marker_follows_focus() {
        let mut app = sample_app();
        app.focus = Focus::Months;
        app.month_cursor = 1;
        let text = render_to_string(22, 20, |f| render(f, f.area(), &app));
        assert!(text.contains(">[x] February"));
        assert!(text.contains(" [ ] 2023"));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let items: Vec<(String, bool)> = (1..=12).map(|m| (format!("M{m:02}"), true)).collect();
        let text = render_to_string(22, 6, |f| {
            render_list(f, f.area(), Focus::Months, &items, 11, Focus::Months)
        });
        assert!(text.contains(">[x] M12"));
        assert!(!text.contains("M01"));
    }
}
