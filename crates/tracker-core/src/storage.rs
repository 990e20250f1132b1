//! The ledger store contract and the sheet-grid helpers shared by stores.
//!
//! A store behaves like a single spreadsheet tab: physical row 1 holds the
//! column headers and data starts on physical row 2. Callers work with
//! 0-based logical indices into the loaded rows and convert with
//! [`physical_row`].

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use tracker_domain::NewTransaction;

use crate::CoreError;

/// Column headers, in the order rows are written.
pub const COLUMNS: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];

pub const DATE_COLUMN: &str = "Date";
pub const TYPE_COLUMN: &str = "Type";
pub const CATEGORY_COLUMN: &str = "Category";
pub const DESCRIPTION_COLUMN: &str = "Description";
pub const AMOUNT_COLUMN: &str = "Amount";

/// Number of header rows above the data.
pub const HEADER_ROWS: usize = 1;

/// Physical (1-based) address of logical row 0.
pub const FIRST_DATA_ROW: usize = HEADER_ROWS + 1;

/// Converts a 0-based logical index into the store's 1-based physical row.
pub fn physical_row(logical_index: usize) -> usize {
    logical_index + FIRST_DATA_ROW
}

/// A single cell as a spreadsheet reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(text) if text.trim().is_empty())
    }

    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

/// One data row keyed by column header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.cells.insert(column.into(), value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

/// Persistence backend holding the ledger rows.
///
/// Implementations perform no validation and no uniqueness checks. Deleting
/// a row shifts every later row up by one, so batch deletes must run from
/// the highest row to the lowest.
pub trait LedgerStore: Send + Sync {
    /// Every data row, in persisted order.
    fn load_all(&self) -> Result<Vec<RawRow>, CoreError>;

    /// Appends one row whose cells follow [`COLUMNS`].
    fn append_row(&self, cells: Vec<CellValue>) -> Result<(), CoreError>;

    /// Removes the row at the 1-based physical address.
    fn delete_row(&self, physical_row: usize) -> Result<(), CoreError>;
}

/// The header row a freshly created sheet starts with.
pub fn header_row() -> Vec<CellValue> {
    COLUMNS
        .iter()
        .map(|name| CellValue::Text((*name).to_string()))
        .collect()
}

/// Turns a grid (header row first) into keyed records.
///
/// Short rows are padded with empty cells. Trailing blank rows are dropped;
/// interior ones are kept so logical indices stay aligned with physical rows.
pub fn records_from_grid(grid: &[Vec<CellValue>]) -> Vec<RawRow> {
    let Some((header, data)) = grid.split_first() else {
        return Vec::new();
    };
    let used = data
        .iter()
        .rposition(|row| !row.iter().all(CellValue::is_blank))
        .map_or(0, |last| last + 1);
    let names: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
    data[..used]
        .iter()
        .map(|row| {
            names
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .fold(RawRow::new(), |record, (idx, name)| {
                    let value = row.get(idx).cloned().unwrap_or_else(CellValue::empty);
                    record.with(name.clone(), value)
                })
        })
        .collect()
}

/// Cells for an appended transaction, in [`COLUMNS`] order.
pub fn cells_for(txn: &NewTransaction) -> Vec<CellValue> {
    vec![
        CellValue::Text(txn.date().format("%Y-%m-%d").to_string()),
        CellValue::Text(txn.kind().as_str().to_string()),
        CellValue::Text(txn.category().label()),
        CellValue::Text(txn.description().to_string()),
        CellValue::Number(txn.amount()),
    ]
}
