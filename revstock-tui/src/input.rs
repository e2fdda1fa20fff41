//! Keyboard input dispatch — overlay → global keys → sidebar keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. The help overlay consumes input first.
    if app.overlay == Overlay::Help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter
        ) {
            app.overlay = Overlay::None;
        }
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char(']') | KeyCode::Right | KeyCode::Char('l') => {
            app.next_symbol();
            return;
        }
        KeyCode::Char('[') | KeyCode::Left | KeyCode::Char('h') => {
            app.prev_symbol();
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        KeyCode::Char('d') => {
            app.reset_defaults();
            return;
        }
        _ => {}
    }

    // 3. Sidebar keys act on the focused list.
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_at_cursor(),
        KeyCode::Char('a') => app.select_all(),
        _ => {}
    }
}
