//! Ledger mutations: append, single delete, batch delete.
//!
//! Mutating functions consume the snapshot they act on. After a write the
//! caller has to load again before it can address rows.

use chrono::NaiveDate;
use tracing::info;

use tracker_domain::{NewTransaction, Transaction};

use crate::{
    ledger_service::{LedgerSnapshot, RowRef},
    storage::{cells_for, physical_row, LedgerStore},
    CoreError,
};

pub struct TransactionService;

impl TransactionService {
    /// Appends a validated transaction at the end of the ledger.
    pub fn add(store: &dyn LedgerStore, txn: &NewTransaction) -> Result<(), CoreError> {
        store.append_row(cells_for(txn))?;
        info!(
            date = %txn.date(),
            kind = %txn.kind(),
            category = txn.category().name(),
            amount = txn.amount(),
            "transaction appended"
        );
        Ok(())
    }

    /// Deletes one row and returns the transaction it held.
    pub fn delete(
        store: &dyn LedgerStore,
        snapshot: LedgerSnapshot,
        row: RowRef,
    ) -> Result<Transaction, CoreError> {
        let removed = snapshot.get(row)?.clone();
        store.delete_row(physical_row(row.index()))?;
        info!(index = row.index(), "transaction deleted");
        Ok(removed)
    }

    /// Deletes several rows of one snapshot, highest index first so earlier
    /// deletions never shift the rows still to be deleted.
    ///
    /// A store failure stops the batch; rows already removed stay removed.
    pub fn delete_rows(
        store: &dyn LedgerStore,
        snapshot: LedgerSnapshot,
        rows: &[RowRef],
    ) -> Result<usize, CoreError> {
        for row in rows {
            snapshot.get(*row)?;
        }
        let indices: Vec<usize> = rows.iter().map(RowRef::index).collect();
        let order = Self::deletion_order(&indices);
        for index in &order {
            store.delete_row(physical_row(*index))?;
        }
        info!(count = order.len(), "transactions deleted");
        Ok(order.len())
    }

    /// Deletes every transaction dated `date`.
    pub fn delete_all_for_date(
        store: &dyn LedgerStore,
        snapshot: LedgerSnapshot,
        date: NaiveDate,
    ) -> Result<usize, CoreError> {
        let rows = snapshot.rows_on(date);
        Self::delete_rows(store, snapshot, &rows)
    }

    /// Distinct indices sorted from highest to lowest.
    pub fn deletion_order(indices: &[usize]) -> Vec<usize> {
        let mut order = indices.to_vec();
        order.sort_unstable_by(|a, b| b.cmp(a));
        order.dedup();
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_order_runs_high_to_low_without_duplicates() {
        assert_eq!(
            TransactionService::deletion_order(&[2, 0, 1, 2]),
            vec![2, 1, 0]
        );
        assert!(TransactionService::deletion_order(&[]).is_empty());
    }
}
