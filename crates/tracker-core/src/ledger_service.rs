//! Load cycles and the derived views a presentation layer renders.
//!
//! Every interaction loads a fresh [`LedgerSnapshot`]. Row references handed
//! out by a snapshot carry its cycle id and are refused by any other
//! snapshot, which keeps positional indices from outliving the load that
//! produced them.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use tracker_domain::{MonthKey, ReportScope, Transaction};

use crate::{
    ingest::parse_rows, storage::LedgerStore, summary_service::SummaryService, CoreError, Totals,
};

/// Handle on one transaction of one load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRef {
    cycle: Uuid,
    index: usize,
}

impl RowRef {
    /// 0-based logical index within the snapshot.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// The full ledger as read by one load.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    cycle: Uuid,
    transactions: Vec<Transaction>,
}

impl LedgerSnapshot {
    /// Wraps loaded transactions, renumbering `row_index` to load order.
    pub fn new(mut transactions: Vec<Transaction>) -> Self {
        for (index, txn) in transactions.iter_mut().enumerate() {
            txn.row_index = index;
        }
        Self {
            cycle: Uuid::new_v4(),
            transactions,
        }
    }

    pub fn cycle(&self) -> Uuid {
        self.cycle
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Reference to the transaction at logical `index`.
    pub fn row_ref(&self, index: usize) -> Result<RowRef, CoreError> {
        if index < self.transactions.len() {
            Ok(RowRef {
                cycle: self.cycle,
                index,
            })
        } else {
            Err(CoreError::UnknownRow(index))
        }
    }

    pub fn get(&self, row: RowRef) -> Result<&Transaction, CoreError> {
        self.check(row)?;
        self.transactions
            .get(row.index)
            .ok_or(CoreError::UnknownRow(row.index))
    }

    pub(crate) fn check(&self, row: RowRef) -> Result<(), CoreError> {
        if row.cycle == self.cycle {
            Ok(())
        } else {
            Err(CoreError::StaleRowReference)
        }
    }

    /// Row references for the transactions dated `date`, in ledger order.
    pub fn rows_on(&self, date: NaiveDate) -> Vec<RowRef> {
        SummaryService::filter_by_date(&self.transactions, date)
            .into_iter()
            .map(|txn| RowRef {
                cycle: self.cycle,
                index: txn.row_index,
            })
            .collect()
    }
}

/// Figures shown on the landing view.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub today: NaiveDate,
    /// All-time income minus expense.
    pub savings: f64,
    pub month: MonthKey,
    pub month_totals: Totals,
    pub todays_transactions: Vec<Transaction>,
    pub available_months: Vec<MonthKey>,
}

/// Totals and rows for one report scope.
#[derive(Debug, Clone)]
pub struct Report {
    pub scope: ReportScope,
    pub totals: Totals,
    pub transactions: Vec<Transaction>,
}

impl Report {
    /// `true` when nothing falls in the scope; views show "no data".
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

pub struct LedgerService;

impl LedgerService {
    /// Reads and parses the whole ledger. Any failure aborts the load.
    pub fn load(store: &dyn LedgerStore) -> Result<LedgerSnapshot, CoreError> {
        let rows = store.load_all()?;
        let transactions = parse_rows(&rows)?;
        let snapshot = LedgerSnapshot::new(transactions);
        debug!(cycle = %snapshot.cycle, rows = snapshot.len(), "ledger loaded");
        Ok(snapshot)
    }

    pub fn dashboard(snapshot: &LedgerSnapshot, today: NaiveDate) -> Dashboard {
        let txns = snapshot.transactions();
        Dashboard {
            today,
            savings: SummaryService::savings(txns),
            month: SummaryService::month_key(today),
            month_totals: SummaryService::current_month_totals(txns, today),
            todays_transactions: SummaryService::filter_by_date(txns, today)
                .into_iter()
                .cloned()
                .collect(),
            available_months: SummaryService::available_months(txns),
        }
    }

    pub fn report(snapshot: &LedgerSnapshot, scope: ReportScope) -> Report {
        let rows = SummaryService::filter_by_scope(snapshot.transactions(), scope);
        Report {
            scope,
            totals: SummaryService::totals_by_type(rows.iter().copied()),
            transactions: rows.into_iter().cloned().collect(),
        }
    }

    /// Month a monthly report opens on: the latest month with data, or the
    /// month of `today` for an empty ledger.
    pub fn default_report_month(snapshot: &LedgerSnapshot, today: NaiveDate) -> MonthKey {
        SummaryService::default_month(snapshot.transactions())
            .unwrap_or_else(|| SummaryService::month_key(today))
    }
}
