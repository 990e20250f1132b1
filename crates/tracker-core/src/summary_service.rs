//! Aggregation engine: pure functions over a loaded transaction set.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use tracker_domain::{MonthKey, ReportScope, Transaction, TransactionType};

/// Income and expense sums over some set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Totals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Sums amounts by type over exactly the given transactions.
    pub fn totals_by_type<'a, I>(transactions: I) -> Totals
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Totals::default(), |mut totals, txn| {
                match txn.kind {
                    TransactionType::Income => totals.income += txn.amount,
                    TransactionType::Expense => totals.expense += txn.amount,
                }
                totals
            })
    }

    /// Lifetime net over the whole ledger. Never period scoped.
    pub fn savings(transactions: &[Transaction]) -> f64 {
        Self::totals_by_type(transactions).net()
    }

    pub fn month_key(date: NaiveDate) -> MonthKey {
        MonthKey::of(date)
    }

    pub fn filter_by_month(transactions: &[Transaction], key: MonthKey) -> Vec<&Transaction> {
        transactions
            .iter()
            .filter(|txn| Self::month_key(txn.date) == key)
            .collect()
    }

    pub fn filter_by_date(transactions: &[Transaction], date: NaiveDate) -> Vec<&Transaction> {
        transactions.iter().filter(|txn| txn.date == date).collect()
    }

    pub fn filter_by_scope(transactions: &[Transaction], scope: ReportScope) -> Vec<&Transaction> {
        match scope {
            ReportScope::Day(date) => Self::filter_by_date(transactions, date),
            ReportScope::Month(key) => Self::filter_by_month(transactions, key),
        }
    }

    /// Totals for the calendar month containing `today`.
    pub fn current_month_totals(transactions: &[Transaction], today: NaiveDate) -> Totals {
        Self::totals_by_type(Self::filter_by_month(transactions, Self::month_key(today)))
    }

    pub fn report_totals(transactions: &[Transaction], scope: ReportScope) -> Totals {
        Self::totals_by_type(Self::filter_by_scope(transactions, scope))
    }

    /// Distinct months present in the ledger, oldest first.
    pub fn available_months(transactions: &[Transaction]) -> Vec<MonthKey> {
        transactions
            .iter()
            .map(|txn| Self::month_key(txn.date))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The month a month selector starts on: the most recent one.
    pub fn default_month(transactions: &[Transaction]) -> Option<MonthKey> {
        Self::available_months(transactions).last().copied()
    }
}
