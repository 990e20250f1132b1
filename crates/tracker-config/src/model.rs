use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// User-configurable tracker preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Name of the ledger sheet; also the default ledger file stem.
    #[serde(default = "Config::default_sheet_name")]
    pub sheet_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Explicit ledger file. Defaults to `<home>/sheets/<sheet_name>.json`.
    pub ledger_path: Option<PathBuf>,

    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default)]
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_name: Self::default_sheet_name(),
            ledger_path: None,
            currency_symbol: Self::default_currency_symbol(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            plain_output: false,
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`], in display order.
    pub const KEYS: [&'static str; 5] = [
        "sheet_name",
        "ledger_path",
        "currency_symbol",
        "ui_color_enabled",
        "plain_output",
    ];

    pub fn default_sheet_name() -> String {
        "Budget_Tracker".into()
    }

    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_ledger_path(&self, home: &Path) -> PathBuf {
        if let Some(path) = &self.ledger_path {
            return path.clone();
        }
        home.join("sheets").join(format!("{}.json", self.sheet_name))
    }

    /// Current value of `key` rendered as text.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "sheet_name" => self.sheet_name.clone(),
            "ledger_path" => self
                .ledger_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(default)".into()),
            "currency_symbol" => self.currency_symbol.clone(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "plain_output" => self.plain_output.to_string(),
            other => return Err(ConfigError::UnknownKey(other.into())),
        };
        Ok(value)
    }

    /// Updates `key` from user text. `ledger_path` accepts `default` to clear.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "sheet_name" => {
                if value.is_empty() || value.contains(['/', '\\']) {
                    return Err(invalid(key, "expected a plain sheet name"));
                }
                self.sheet_name = value.into();
            }
            "ledger_path" => {
                self.ledger_path = match value {
                    "" | "default" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(invalid(key, "symbol cannot be empty"));
                }
                self.currency_symbol = value.into();
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_flag(key, value)?,
            "plain_output" => self.plain_output = parse_flag(key, value)?,
            other => return Err(ConfigError::UnknownKey(other.into())),
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, "expected true or false")),
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.into(),
        message: message.into(),
    }
}
