//! Metric widgets for the dashboard and report views.
//!
//! A widget is a small box with a caption and one formatted figure. Widgets
//! of one group share a width and sit side by side when the terminal is wide
//! enough, otherwise they stack.

use crossterm::terminal;

use crate::cli::{
    io,
    ui::{
        style::{Tone, UiStyle},
        table::display_width,
    },
};

const MIN_INNER_WIDTH: usize = 18;
const GAP: &str = "  ";
const FALLBACK_TERMINAL_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct Metric {
    pub caption: String,
    pub value: String,
    pub tone: Tone,
}

impl Metric {
    pub fn new(caption: impl Into<String>, value: impl Into<String>, tone: Tone) -> Self {
        Self {
            caption: caption.into(),
            value: value.into(),
            tone,
        }
    }
}

/// Columns available to the renderer.
pub fn terminal_width() -> usize {
    terminal::size()
        .map(|(columns, _)| usize::from(columns))
        .unwrap_or(FALLBACK_TERMINAL_WIDTH)
}

fn inner_width(metrics: &[Metric]) -> usize {
    metrics
        .iter()
        .flat_map(|metric| [display_width(&metric.caption), display_width(&metric.value)])
        .max()
        .unwrap_or(0)
        .max(MIN_INNER_WIDTH)
}

fn pad(text: &str, width: usize) -> String {
    format!("{text}{}", " ".repeat(width.saturating_sub(display_width(text))))
}

fn boxed(metric: &Metric, inner: usize, style: &UiStyle) -> Vec<String> {
    let rule = "─".repeat(inner + 2);
    let value = style.apply_tone(&pad(&metric.value, inner), metric.tone);
    vec![
        format!("┌{rule}┐"),
        format!("│ {} │", pad(&metric.caption, inner)),
        format!("│ {value} │"),
        format!("└{rule}┘"),
    ]
}

/// Lays out `metrics` for a terminal `columns` wide.
pub fn layout(metrics: &[Metric], style: &UiStyle, columns: usize) -> Vec<String> {
    if style.plain_mode {
        return metrics
            .iter()
            .map(|metric| format!("{}: {}", metric.caption, metric.value))
            .collect();
    }

    let inner = inner_width(metrics);
    let boxes: Vec<Vec<String>> = metrics
        .iter()
        .map(|metric| boxed(metric, inner, style))
        .collect();

    let box_width = inner + 4;
    let row_width = metrics.len() * box_width + metrics.len().saturating_sub(1) * GAP.len();
    if row_width <= columns {
        (0..4)
            .map(|line| {
                boxes
                    .iter()
                    .map(|lines| lines[line].as_str())
                    .collect::<Vec<_>>()
                    .join(GAP)
            })
            .collect()
    } else {
        boxes.into_iter().flatten().collect()
    }
}

pub fn render_metrics(metrics: &[Metric], style: &UiStyle) {
    for line in layout(metrics, style, terminal_width()) {
        io::println_text(&line);
    }
}
