//! Interactive transaction entry.
//!
//! The validators are plain functions so the same rules apply to typed
//! command arguments and to the dialoguer prompts.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use tracker_domain::{Category, NewTransaction, TransactionType};

use crate::cli::core::CommandError;
use crate::cli::io;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` entry date.
pub fn validate_date(input: &str) -> Result<NaiveDate, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Date is required (use YYYY-MM-DD)".into());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| "Use YYYY-MM-DD format".into())
}

/// Parses a non-negative amount. A leading currency symbol and thousands
/// separators are tolerated.
pub fn validate_amount(input: &str, symbol: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Amount is required".into());
    }
    let cleaned: String = trimmed
        .strip_prefix(symbol)
        .unwrap_or(trimmed)
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    let value = cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| "Enter a numeric amount".to_string())?;
    if !value.is_finite() {
        Err("Enter a numeric amount".into())
    } else if value < 0.0 {
        Err("Amount must be zero or positive".into())
    } else {
        Ok(value)
    }
}

/// Walks the user through date, type, category, description and amount.
/// Returns `None` when the user declines to save.
pub fn prompt_transaction(
    theme: &ColorfulTheme,
    today: NaiveDate,
    symbol: &str,
) -> Result<Option<NewTransaction>, CommandError> {
    let date_text = Input::<String>::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .default(today.format(DATE_FORMAT).to_string())
        .validate_with(|value: &String| validate_date(value).map(|_| ()))
        .interact_text()?;
    let date = validate_date(&date_text).map_err(CommandError::InvalidArguments)?;

    let kinds = [TransactionType::Income, TransactionType::Expense];
    let kind = kinds[Select::with_theme(theme)
        .with_prompt("Type")
        .items(&kinds)
        .default(1)
        .interact()?];

    let vocabulary = Category::vocabulary(kind);
    let labels: Vec<String> = vocabulary.iter().map(|category| category.label()).collect();
    let category = vocabulary[Select::with_theme(theme)
        .with_prompt("Category")
        .items(&labels)
        .default(0)
        .interact()?];

    let description = Input::<String>::with_theme(theme)
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;

    let amount_text = Input::<String>::with_theme(theme)
        .with_prompt(format!("Amount ({symbol})"))
        .validate_with(|value: &String| validate_amount(value, symbol).map(|_| ()))
        .interact_text()?;
    let amount = validate_amount(&amount_text, symbol).map_err(CommandError::InvalidArguments)?;

    let transaction = NewTransaction::new(date, kind, category, description.trim(), amount)?;
    if io::confirm_action(theme, "Save this transaction?", true)? {
        Ok(Some(transaction))
    } else {
        Ok(None)
    }
}
