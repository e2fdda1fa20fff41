//! Help overlay — keyboard shortcuts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc] close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Keyboard");
    key(&mut lines, "[ / ]", "Previous / next ticker");
    key(&mut lines, "Tab", "Switch focus: Year / Month");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "Space", "Toggle year or month");
    key(&mut lines, "a", "Select every year or month");
    key(&mut lines, "d", "Reset filters to defaults");
    key(&mut lines, "r", "Reload the data file if it changed");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Defaults");
    key(&mut lines, "Year", "Latest year for the ticker");
    key(&mut lines, "Month", "Every month present");
    key(&mut lines, "KPIs", "Last trading day in the selection");

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, popup);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>8}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
