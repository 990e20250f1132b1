use chrono::NaiveDate;

use tracker_domain::{
    Category, ExpenseCategory, IncomeCategory, MonthKey, NewTransaction, ReportScope,
    TransactionType,
};

use crate::{
    ledger_service::LedgerService,
    memory::InMemoryLedgerStore,
    storage::{CellValue, LedgerStore},
    summary_service::SummaryService,
    transaction_service::TransactionService,
    CoreError,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn salary(on: NaiveDate, amount: f64) -> NewTransaction {
    NewTransaction::new(
        on,
        TransactionType::Income,
        Category::Income(IncomeCategory::Salary),
        "",
        amount,
    )
    .unwrap()
}

fn food(on: NaiveDate, description: &str, amount: f64) -> NewTransaction {
    NewTransaction::new(
        on,
        TransactionType::Expense,
        Category::Expense(ExpenseCategory::Food),
        description,
        amount,
    )
    .unwrap()
}

fn scenario_store() -> InMemoryLedgerStore {
    let store = InMemoryLedgerStore::new();
    TransactionService::add(&store, &salary(date(2024, 3, 1), 5000.0)).unwrap();
    TransactionService::add(&store, &food(date(2024, 3, 2), "", 200.0)).unwrap();
    TransactionService::add(&store, &salary(date(2024, 4, 1), 5000.0)).unwrap();
    store
}

#[test]
fn scenario_current_month_savings_and_months() {
    let store = scenario_store();
    let snapshot = LedgerService::load(&store).unwrap();
    let txns = snapshot.transactions();

    let month = SummaryService::current_month_totals(txns, date(2024, 3, 15));
    assert_eq!(month.income, 5000.0);
    assert_eq!(month.expense, 200.0);
    assert_eq!(month.net(), 4800.0);

    assert_eq!(SummaryService::savings(txns), 9800.0);

    let months: Vec<String> = SummaryService::available_months(txns)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(months, vec!["2024-03", "2024-04"]);
    assert_eq!(
        LedgerService::default_report_month(&snapshot, date(2024, 3, 15)).to_string(),
        "2024-04"
    );
}

#[test]
fn scenario_empty_ledger_reports_no_data() {
    let store = InMemoryLedgerStore::new();
    let snapshot = LedgerService::load(&store).unwrap();
    let today = date(2024, 3, 15);

    let dashboard = LedgerService::dashboard(&snapshot, today);
    assert_eq!(dashboard.savings, 0.0);
    assert_eq!(dashboard.month_totals.income, 0.0);
    assert_eq!(dashboard.month_totals.expense, 0.0);
    assert_eq!(dashboard.month_totals.net(), 0.0);
    assert!(dashboard.available_months.is_empty());
    assert!(dashboard.todays_transactions.is_empty());

    let report = LedgerService::report(&snapshot, ReportScope::Day(today));
    assert!(report.is_empty());
    assert_eq!(report.totals.net(), 0.0);
    assert_eq!(
        LedgerService::default_report_month(&snapshot, today),
        MonthKey::new(2024, 3).unwrap()
    );
}

#[test]
fn savings_ignores_the_dashboard_month() {
    let store = scenario_store();
    let snapshot = LedgerService::load(&store).unwrap();
    let far_future = LedgerService::dashboard(&snapshot, date(2030, 1, 1));
    assert_eq!(far_future.savings, 9800.0);
    assert_eq!(far_future.month_totals.net(), 0.0);
}

#[test]
fn appended_transaction_round_trips_every_field() {
    let store = InMemoryLedgerStore::new();
    let new_txn = food(date(2024, 3, 5), "Lunch with Sam", 18.75);
    TransactionService::add(&store, &new_txn).unwrap();

    let snapshot = LedgerService::load(&store).unwrap();
    let loaded = &snapshot.transactions()[0];
    assert_eq!(loaded.date, new_txn.date());
    assert_eq!(loaded.kind, new_txn.kind());
    assert_eq!(loaded.category, new_txn.category().label());
    assert_eq!(loaded.description, "Lunch with Sam");
    assert_eq!(loaded.amount, 18.75);
    assert_eq!(loaded.known_category(), Some(new_txn.category()));
}

#[test]
fn report_scopes_select_day_or_month() {
    let store = scenario_store();
    let snapshot = LedgerService::load(&store).unwrap();

    let daily = LedgerService::report(&snapshot, ReportScope::Day(date(2024, 3, 2)));
    assert_eq!(daily.transactions.len(), 1);
    assert_eq!(daily.totals.expense, 200.0);
    assert_eq!(daily.totals.net(), -200.0);

    let april = LedgerService::report(
        &snapshot,
        ReportScope::Month(MonthKey::new(2024, 4).unwrap()),
    );
    assert_eq!(april.totals.income, 5000.0);
    assert_eq!(april.totals.expense, 0.0);
    assert_eq!(
        SummaryService::report_totals(
            snapshot.transactions(),
            ReportScope::Month(MonthKey::new(2024, 4).unwrap())
        ),
        april.totals
    );
}

#[test]
fn filter_by_date_ignores_time_of_day_in_raw_rows() {
    let store = InMemoryLedgerStore::new();
    for raw in ["2024-03-05", "2024-03-05T00:00:00", "2024-03-05 17:30:00"] {
        store
            .append_row(vec![
                CellValue::Text(raw.into()),
                CellValue::Text("Expense".into()),
                CellValue::Text("⛽ Gas".into()),
                CellValue::Text(String::new()),
                CellValue::Number(1.0),
            ])
            .unwrap();
    }
    let snapshot = LedgerService::load(&store).unwrap();
    let matches = SummaryService::filter_by_date(snapshot.transactions(), date(2024, 3, 5));
    assert_eq!(matches.len(), 3);
}

#[test]
fn batch_delete_removes_the_intended_rows() {
    let store = InMemoryLedgerStore::new();
    for (idx, label) in ["a", "b", "c", "d"].iter().enumerate() {
        TransactionService::add(&store, &food(date(2024, 3, 1 + idx as u32), label, 1.0)).unwrap();
    }
    let snapshot = LedgerService::load(&store).unwrap();
    let rows: Vec<_> = [2, 0, 1]
        .iter()
        .map(|idx| snapshot.row_ref(*idx).unwrap())
        .collect();

    let deleted = TransactionService::delete_rows(&store, snapshot, &rows).unwrap();
    assert_eq!(deleted, 3);

    let remaining = LedgerService::load(&store).unwrap();
    let descriptions: Vec<&str> = remaining
        .transactions()
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["d"]);
}

#[test]
fn low_to_high_deletion_would_remove_the_wrong_rows() {
    let store = InMemoryLedgerStore::new();
    for label in ["a", "b", "c", "d", "e"] {
        TransactionService::add(&store, &food(date(2024, 3, 1), label, 1.0)).unwrap();
    }
    for index in [0usize, 1, 2] {
        store.delete_row(crate::storage::physical_row(index)).unwrap();
    }
    let remaining = LedgerService::load(&store).unwrap();
    let descriptions: Vec<&str> = remaining
        .transactions()
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    // a, c and e went instead of a, b and c.
    assert_eq!(descriptions, vec!["b", "d"]);
}

#[test]
fn delete_all_for_date_leaves_other_days() {
    let store = InMemoryLedgerStore::new();
    let today = date(2024, 3, 5);
    TransactionService::add(&store, &food(today, "breakfast", 5.0)).unwrap();
    TransactionService::add(&store, &food(date(2024, 3, 4), "yesterday", 7.0)).unwrap();
    TransactionService::add(&store, &food(today, "dinner", 9.0)).unwrap();
    TransactionService::add(&store, &salary(today, 100.0)).unwrap();

    let snapshot = LedgerService::load(&store).unwrap();
    let deleted = TransactionService::delete_all_for_date(&store, snapshot, today).unwrap();
    assert_eq!(deleted, 3);

    let remaining = LedgerService::load(&store).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining.transactions()[0].description, "yesterday");
}

#[test]
fn single_delete_returns_the_removed_transaction() {
    let store = scenario_store();
    let snapshot = LedgerService::load(&store).unwrap();
    let row = snapshot.row_ref(1).unwrap();
    let removed = TransactionService::delete(&store, snapshot, row).unwrap();
    assert_eq!(removed.amount, 200.0);
    assert_eq!(LedgerService::load(&store).unwrap().len(), 2);
}

#[test]
fn row_refs_from_an_earlier_load_are_refused() {
    let store = scenario_store();
    let first = LedgerService::load(&store).unwrap();
    let stale = first.row_ref(0).unwrap();
    let second = LedgerService::load(&store).unwrap();

    let err = TransactionService::delete(&store, second, stale).unwrap_err();
    assert!(matches!(err, CoreError::StaleRowReference));
    assert_eq!(LedgerService::load(&store).unwrap().len(), 3);
}

#[test]
fn out_of_range_index_is_rejected_before_touching_the_store() {
    let store = scenario_store();
    let snapshot = LedgerService::load(&store).unwrap();
    assert!(matches!(snapshot.row_ref(3), Err(CoreError::UnknownRow(3))));
}

#[test]
fn rejected_mutation_leaves_the_ledger_unchanged() {
    let store = scenario_store();
    store.set_read_only(true);

    let err = TransactionService::add(&store, &salary(date(2024, 4, 2), 1.0)).unwrap_err();
    assert!(matches!(err, CoreError::Store(_)));

    let snapshot = LedgerService::load(&store).unwrap();
    let row = snapshot.row_ref(0).unwrap();
    assert!(TransactionService::delete(&store, snapshot, row).is_err());
    assert_eq!(LedgerService::load(&store).unwrap().len(), 3);
}

#[test]
fn malformed_date_fails_the_whole_load() {
    let store = scenario_store();
    store
        .append_row(vec![
            CellValue::Text("not a date".into()),
            CellValue::Text("Income".into()),
            CellValue::Text("💼 Bonus".into()),
            CellValue::Text(String::new()),
            CellValue::Number(1.0),
        ])
        .unwrap();
    let err = LedgerService::load(&store).unwrap_err();
    assert!(matches!(err, CoreError::InvalidField { row: 5, .. }));
}

#[test]
fn grid_without_date_header_is_a_missing_column() {
    let store = InMemoryLedgerStore::from_grid(vec![
        vec![
            CellValue::Text("When".into()),
            CellValue::Text("Type".into()),
            CellValue::Text("Category".into()),
            CellValue::Text("Description".into()),
            CellValue::Text("Amount".into()),
        ],
        vec![
            CellValue::Text("2024-03-01".into()),
            CellValue::Text("Income".into()),
            CellValue::Text("🏦 Salary".into()),
            CellValue::Text(String::new()),
            CellValue::Number(1.0),
        ],
    ]);
    let err = LedgerService::load(&store).unwrap_err();
    assert!(matches!(err, CoreError::MissingColumn(ref col) if col == "Date"));
}
