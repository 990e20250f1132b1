//! tracker-core
//!
//! Aggregation engine and services for the budget tracker.
//! Depends on tracker-domain. No CLI and no terminal I/O; persistence is
//! reached only through the [`storage::LedgerStore`] trait.

pub mod error;
pub mod format;
pub mod ingest;
pub mod ledger_service;
pub mod memory;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod transaction_service;

pub use error::CoreError;
pub use format::*;
pub use ledger_service::*;
pub use memory::InMemoryLedgerStore;
pub use storage::{CellValue, LedgerStore, RawRow};
pub use summary_service::*;
pub use time::{Clock, FixedClock};
pub use transaction_service::*;

#[cfg(test)]
mod tests;
