
use thiserror::Error;

use tracker_config::ConfigError;
use tracker_core::CoreError;
use tracker_domain::TransactionValidationError;

/// Unified error type for the engine, store and configuration layers.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Could not load the ledger: {0}")]
    Load(CoreError),
    #[error("Ledger update failed: {0}")]
    Ledger(#[from] CoreError),
    #[error("Invalid transaction: {0}")]
    Validation(#[from] TransactionValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TrackerError {
    /// Wraps a failure raised while reading the ledger at the start of a cycle.
    pub fn load(err: CoreError) -> Self {
        TrackerError::Load(err)
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Core(TrackerError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Core(TrackerError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}
