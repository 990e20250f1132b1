//! In-process ledger store following the same sheet addressing as the
//! file-backed stores. Used by tests and by callers that want a scratch
//! ledger.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    RwLock,
};

use crate::{
    storage::{
        header_row, records_from_grid, CellValue, LedgerStore, RawRow, FIRST_DATA_ROW, HEADER_ROWS,
    },
    CoreError,
};

#[derive(Debug)]
pub struct InMemoryLedgerStore {
    grid: RwLock<Vec<Vec<CellValue>>>,
    read_only: AtomicBool,
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedgerStore {
    /// An empty sheet holding only the header row.
    pub fn new() -> Self {
        Self::from_grid(vec![header_row()])
    }

    /// A sheet with an explicit grid; the first row is the header.
    pub fn from_grid(grid: Vec<Vec<CellValue>>) -> Self {
        Self {
            grid: RwLock::new(grid),
            read_only: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent append and delete fail, as a store rejecting
    /// writes would.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Data rows currently held, header excluded.
    pub fn row_count(&self) -> usize {
        self.grid
            .read()
            .map(|grid| grid.len().saturating_sub(HEADER_ROWS))
            .unwrap_or(0)
    }

    fn ensure_writable(&self) -> Result<(), CoreError> {
        if self.read_only.load(Ordering::SeqCst) {
            Err(CoreError::Store("ledger store is read-only".into()))
        } else {
            Ok(())
        }
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load_all(&self) -> Result<Vec<RawRow>, CoreError> {
        let grid = self
            .grid
            .read()
            .map_err(|_| CoreError::Store("ledger store lock poisoned".into()))?;
        Ok(records_from_grid(&grid))
    }

    fn append_row(&self, cells: Vec<CellValue>) -> Result<(), CoreError> {
        self.ensure_writable()?;
        let mut grid = self
            .grid
            .write()
            .map_err(|_| CoreError::Store("ledger store lock poisoned".into()))?;
        grid.push(cells);
        Ok(())
    }

    fn delete_row(&self, physical_row: usize) -> Result<(), CoreError> {
        self.ensure_writable()?;
        let mut grid = self
            .grid
            .write()
            .map_err(|_| CoreError::Store("ledger store lock poisoned".into()))?;
        if physical_row < FIRST_DATA_ROW || physical_row > grid.len() {
            return Err(CoreError::RowOutOfRange(physical_row));
        }
        grid.remove(physical_row - 1);
        Ok(())
    }
}
