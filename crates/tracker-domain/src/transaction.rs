//! Domain models for ledger transactions.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::{normalize_category, Category};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Decides whether an amount adds to or subtracts from totals.
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

/// A transaction as loaded from the ledger.
///
/// `row_index` is the position within the loaded sequence and is only
/// meaningful until the next mutation of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub kind: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    pub row_index: usize,
}

impl Transaction {
    /// Lowercase descriptive phrase of the category, glyph removed.
    pub fn category_key(&self) -> Option<String> {
        normalize_category(&self.category)
    }

    /// The vocabulary entry matching the stored label, if any.
    pub fn known_category(&self) -> Option<Category> {
        Category::parse_for(self.kind, &self.category)
    }

    /// Amount with the sign its type contributes to a net figure.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    NegativeAmount(f64),
    NonFiniteAmount,
    CategoryMismatch {
        kind: TransactionType,
        category: Category,
    },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionValidationError::NegativeAmount(amount) => {
                write!(f, "amount must not be negative (got {amount})")
            }
            TransactionValidationError::NonFiniteAmount => f.write_str("amount must be a number"),
            TransactionValidationError::CategoryMismatch { kind, category } => write!(
                f,
                "category `{}` is not an {} category",
                category.name(),
                kind.as_str().to_lowercase()
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

/// A validated transaction waiting to be appended to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    date: NaiveDate,
    kind: TransactionType,
    category: Category,
    description: String,
    amount: f64,
}

impl NewTransaction {
    pub fn new(
        date: NaiveDate,
        kind: TransactionType,
        category: Category,
        description: impl Into<String>,
        amount: f64,
    ) -> Result<Self, TransactionValidationError> {
        if !amount.is_finite() {
            return Err(TransactionValidationError::NonFiniteAmount);
        }
        if amount < 0.0 {
            return Err(TransactionValidationError::NegativeAmount(amount));
        }
        if category.kind() != kind {
            return Err(TransactionValidationError::CategoryMismatch { kind, category });
        }
        Ok(Self {
            date,
            kind,
            category,
            description: description.into(),
            amount,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}
