use std::io::IsTerminal;

use colored::{Color, Colorize};

use crate::cli::output::current_preferences;

/// Tone of a figure; picks the accent color of its widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
}

impl Tone {
    /// Positive for a gain, negative for a loss, neutral at zero.
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Tone::Positive
        } else if value < 0.0 {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiStyle {
    pub use_color: bool,
    pub plain_mode: bool,
    pub horizontal: char,
    pub color_header: Option<Color>,
}

impl UiStyle {
    pub fn detect() -> Self {
        let prefs = current_preferences();
        let stdout_tty = std::io::stdout().is_terminal();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let use_color = stdout_tty && prefs.color_enabled && !prefs.plain_mode && !no_color;
        Self {
            use_color,
            plain_mode: prefs.plain_mode,
            horizontal: if prefs.plain_mode { '-' } else { '─' },
            color_header: use_color.then_some(Color::BrightBlue),
        }
    }

    /// Uncolored, box-free style.
    pub fn plain() -> Self {
        Self {
            use_color: false,
            plain_mode: true,
            horizontal: '-',
            color_header: None,
        }
    }

    pub fn horizontal_line(&self, width: usize) -> String {
        self.horizontal.to_string().repeat(width.max(20))
    }

    pub fn apply_header_style(&self, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match self.color_header {
            Some(color) => text.color(color).bold().to_string(),
            None => text.bold().to_string(),
        }
    }

    pub fn apply_tone(&self, text: &str, tone: Tone) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match tone {
            Tone::Positive => text.green().bold().to_string(),
            Tone::Negative => text.red().bold().to_string(),
            Tone::Neutral => text.bold().to_string(),
        }
    }
}
