use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::CommandError;
use crate::cli::output;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Writes a pre-styled line as-is.
pub fn println_text(line: &str) {
    println!("{line}");
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Let the user pick one of `items`; returns its position.
pub fn select_item<T: ToString>(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[T],
    default: usize,
) -> Result<usize, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt for free-form text; an empty answer is allowed when `default` is set.
pub fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    default: Option<&str>,
) -> Result<String, CommandError> {
    let mut input = Input::<String>::with_theme(theme).with_prompt(prompt);
    if let Some(value) = default {
        input = input.default(value.to_string()).allow_empty(true);
    }
    input.interact_text().map_err(CommandError::from)
}
