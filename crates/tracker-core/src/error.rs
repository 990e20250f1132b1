use thiserror::Error;

use tracker_domain::TransactionValidationError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Ledger store error: {0}")]
    Store(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("'{0}' column not found in ledger")]
    MissingColumn(String),
    #[error("Row {row}: invalid {column}: {message}")]
    InvalidField {
        row: usize,
        column: &'static str,
        message: String,
    },
    #[error("Row {0} does not exist")]
    RowOutOfRange(usize),
    #[error("No transaction at index {0}")]
    UnknownRow(usize),
    #[error("Row reference belongs to an earlier load; reload the ledger first")]
    StaleRowReference,
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<TransactionValidationError> for CoreError {
    fn from(err: TransactionValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
