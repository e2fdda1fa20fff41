//! Parrot/neon theme tokens for the RevStock dashboard.
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, selected ticker)
//! - **Positive**: Neon green (High card, up candles)
//! - **Negative**: Hot pink (Low card, down candles)
//! - **Warning**: Neon orange (no-data state, alerts)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (axes, hints, unselected items)

use ratatui::style::{Color, Modifier, Style};

use revstock_core::Tone;

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;

/// Parrot/neon theme, passed by reference to buffer-drawn widgets.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: BACKGROUND,
            accent: ACCENT,
            positive: POSITIVE,
            negative: NEGATIVE,
            neutral: NEUTRAL,
            muted: MUTED,
            text_primary: TEXT_PRIMARY,
        }
    }

    /// Color for a KPI card tone.
    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Positive => self.positive,
            Tone::Negative => self.negative,
            Tone::Neutral => self.text_primary,
        }
    }

    /// Gradient for the scatter color scale: `t` in [0, 1] runs
    /// muted → neutral → accent as closing prices rise.
    pub fn scale_color(&self, t: f64) -> Color {
        match t {
            t if t >= 0.66 => self.accent,
            t if t >= 0.33 => self.neutral,
            _ => self.muted,
        }
    }
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}
