//! RevStock TUI — single-screen stock history dashboard.
//!
//! Layout:
//! 1. Top row — ticker selector and Open / High / Low / Close cards
//! 2. Sidebar — Year and Month multiselects
//! 3. Charts — High vs Low scatter, volume line, candlesticks
//!
//! Logs go to `revstock-tui.log` in the OS cache dir; stderr belongs to the UI.

mod app;
mod input;
mod panels;
mod theme;
mod ui;

#[cfg(test)]
mod test_helpers;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use revstock_core::Config;

use crate::app::{AppState, Source};

#[derive(Parser)]
#[command(name = "revstock-tui", about = "RevStock dashboard — OHLCV history by ticker, year and month")]
struct Args {
    /// Path to a TOML config file. Defaults to ./revstock.toml, then the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV file to load. Overrides `[data] path` from the config.
    #[arg(long)]
    data: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let config = Config::discover(args.config.as_deref()).context("loading config")?;
    let options = config.load_options()?;
    let path = args.data.unwrap_or_else(|| config.data.path.clone());
    let source = Source {
        path: path.clone(),
        options,
    };

    // Load before touching the terminal so errors print normally.
    let mut app = AppState::load(source, config.dashboard.default_symbol.as_deref())
        .with_context(|| format!("loading {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = app.dataset.len(),
        symbols = app.symbols.len(),
        "dashboard started"
    );

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn init_tracing() -> Result<()> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("revstock");
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let log_path = dir.join("revstock-tui.log");
    let file = File::create(&log_path).with_context(|| format!("creating {}", log_path.display()))?;

    let filter = EnvFilter::try_from_env("REVSTOCK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(file).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
