//! Top row — ticker selector card followed by the Open/High/Low/Close cards.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use revstock_core::KpiCard;

use crate::app::{AppState, NO_DATA_MESSAGE};
use crate::theme::{self, Theme};
use crate::ui::render_message;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20), Constraint::Percentage(80)])
        .split(area);

    render_ticker_card(f, chunks[0], app);

    match &app.view {
        Some(Ok(view)) => {
            let cards = view.kpi.cards();
            let slots = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 4); 4])
                .split(chunks[1]);
            for (card, slot) in cards.iter().zip(slots.iter()) {
                render_card(f, *slot, card);
            }
        }
        Some(Err(_)) => render_message(f, chunks[1], NO_DATA_MESSAGE),
        None => render_message(f, chunks[1], "No symbols loaded"),
    }
}

fn render_ticker_card(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Ticker ")
        .title_style(theme::panel_title(true));

    let lines = match app.selected_symbol() {
        Some(symbol) => {
            let as_of = match &app.view {
                Some(Ok(view)) => format!("as of {}", view.kpi.date.format("%Y-%m-%d")),
                _ => String::new(),
            };
            vec![
                Line::from(vec![
                    Span::styled("[ ", theme::muted()),
                    Span::styled(symbol.to_string(), theme::accent_bold()),
                    Span::styled(" ]", theme::muted()),
                    Span::styled(
                        format!("  {}/{}", app.symbol_idx + 1, app.symbols.len()),
                        theme::muted(),
                    ),
                ]),
                Line::from(Span::styled(as_of, theme::muted())),
            ]
        }
        None => vec![Line::from(Span::styled("(none)", theme::muted()))],
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_card(f: &mut Frame, area: Rect, card: &KpiCard) {
    let color = Theme::default().tone_color(card.tone);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {} ", card.title))
        .title_style(theme::text());

    let value = Line::from(Span::styled(
        card.value.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    let para = Paragraph::new(vec![Line::from(""), value])
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(para, area);
}
