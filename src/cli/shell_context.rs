use std::path::PathBuf;

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use tracing::info;

use tracker_config::{default_home, Config, ConfigManager};
use tracker_core::{Clock, FixedClock, LedgerSnapshot, LedgerStore, SymbolCurrencyFormatter};
use tracker_storage_json::JsonSheetStore;

use crate::cli::commands;
use crate::cli::core::CliError;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandRegistry;
use crate::cli::system_clock::SystemClock;

/// Pins "today" to a fixed `YYYY-MM-DD` date.
pub const TODAY_ENV: &str = "BUDGET_TRACKER_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// The rows shown by the last `today` command. Deletions address rows of
/// this snapshot and consume it.
#[derive(Debug, Clone)]
pub struct TodayListing {
    pub snapshot: LedgerSnapshot,
    pub date: NaiveDate,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub home: PathBuf,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub ledger_path: PathBuf,
    pub store: Box<dyn LedgerStore>,
    pub clock: Box<dyn Clock>,
    pub listing: Option<TodayListing>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_home(mode, default_home(), clock_from_env()?)
    }

    /// Builds a context rooted at `home`, creating the config directory and
    /// an empty ledger sheet on first use.
    pub fn with_home(
        mode: CliMode,
        home: PathBuf,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(home.clone())?;
        let config = config_manager.load()?;
        apply_output_preferences(&config);

        let ledger_path = config.resolve_ledger_path(&home);
        let store = JsonSheetStore::open_or_create(&ledger_path, &config.sheet_name)?;
        info!(ledger = %ledger_path.display(), "ledger sheet opened");

        let registry = commands::registry();

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            home,
            config_manager,
            config,
            ledger_path,
            store: Box::new(store),
            clock,
            listing: None,
            last_command: None,
            running: true,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn formatter(&self) -> SymbolCurrencyFormatter {
        SymbolCurrencyFormatter::new(self.config.currency_symbol.clone())
    }

    pub fn prompt(&self) -> String {
        format!("{}> ", self.config.sheet_name.to_lowercase())
    }
}

pub(crate) fn apply_output_preferences(config: &Config) {
    output::set_preferences(OutputPreferences {
        plain_mode: config.plain_output,
        color_enabled: config.ui_color_enabled,
    });
    if !config.ui_color_enabled || config.plain_output {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
}

fn clock_from_env() -> Result<Box<dyn Clock>, CliError> {
    match std::env::var(TODAY_ENV) {
        Ok(value) if !value.trim().is_empty() => {
            let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
                CliError::Input(format!("{TODAY_ENV} must be YYYY-MM-DD, got `{value}`"))
            })?;
            Ok(Box::new(FixedClock::new(date)))
        }
        _ => Ok(Box::new(SystemClock)),
    }
}
