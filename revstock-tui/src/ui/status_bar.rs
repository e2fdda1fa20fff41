//! Bottom status bar — key hints, last status message, dataset summary.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " [ ]:ticker Tab:focus Space:toggle a:all d:defaults r:reload ?:help q:quit",
        theme::muted(),
    ));

    spans.push(Span::raw(" | "));

    let hash = app.dataset.content_hash();
    spans.push(Span::styled(
        format!(
            "{} rows #{} ",
            app.dataset.len(),
            &hash[..hash.len().min(8)]
        ),
        theme::neutral(),
    ));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::positive(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{render_to_string, sample_app};

    #[test]
    fn shows_hints_rows_and_message() {
        let mut app = sample_app();
        app.set_warning("Reload failed");
        let text = render_to_string(160, 1, |f| render(f, f.area(), &app));
        assert!(text.contains("r:reload"));
        assert!(text.contains("4 rows #"));
        assert!(text.contains("Reload failed"));
    }
}
