use chrono::NaiveDate;
use tempfile::tempdir;

use tracker_core::{
    storage::{header_row, physical_row},
    CellValue, CoreError, LedgerService, LedgerStore, TransactionService,
};
use tracker_domain::{Category, ExpenseCategory, IncomeCategory, NewTransaction, TransactionType};
use tracker_storage_json::{load_document, save_document, JsonSheetStore, SheetDocument};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(description: &str, amount: f64) -> NewTransaction {
    NewTransaction::new(
        date(2024, 3, 2),
        TransactionType::Expense,
        Category::Expense(ExpenseCategory::Rent),
        description,
        amount,
    )
    .unwrap()
}

#[test]
fn open_fails_for_missing_sheet() {
    let dir = tempdir().unwrap();
    let err = JsonSheetStore::open(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, CoreError::Store(_)));
}

#[test]
fn open_or_create_writes_a_header_only_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sheets").join("Budget_Tracker.json");
    let store = JsonSheetStore::open_or_create(&path, "Budget_Tracker").unwrap();

    assert!(path.exists());
    assert_eq!(store.title().unwrap(), "Budget_Tracker");
    assert!(store.load_all().unwrap().is_empty());
    assert_eq!(load_document(&path).unwrap().rows, vec![header_row()]);
}

#[test]
fn appended_rows_survive_reopening() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    {
        let store = JsonSheetStore::open_or_create(&path, "Budget_Tracker").unwrap();
        TransactionService::add(&store, &expense("March rent", 1200.0)).unwrap();
        TransactionService::add(
            &store,
            &NewTransaction::new(
                date(2024, 3, 1),
                TransactionType::Income,
                Category::Income(IncomeCategory::Salary),
                "",
                5000.0,
            )
            .unwrap(),
        )
        .unwrap();
    }

    let reopened = JsonSheetStore::open(&path).unwrap();
    let snapshot = LedgerService::load(&reopened).unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.transactions()[0].description, "March rent");
    assert_eq!(snapshot.transactions()[1].amount, 5000.0);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn delete_row_uses_physical_numbering() {
    let dir = tempdir().unwrap();
    let store = JsonSheetStore::open_or_create(dir.path().join("ledger.json"), "t").unwrap();
    for label in ["a", "b", "c"] {
        TransactionService::add(&store, &expense(label, 1.0)).unwrap();
    }

    store.delete_row(physical_row(1)).unwrap();
    let snapshot = LedgerService::load(&store).unwrap();
    let labels: Vec<&str> = snapshot
        .transactions()
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(labels, vec!["a", "c"]);
}

#[test]
fn header_and_out_of_range_rows_cannot_be_deleted() {
    let dir = tempdir().unwrap();
    let store = JsonSheetStore::open_or_create(dir.path().join("ledger.json"), "t").unwrap();
    TransactionService::add(&store, &expense("only", 1.0)).unwrap();

    assert!(matches!(store.delete_row(1), Err(CoreError::RowOutOfRange(1))));
    assert!(matches!(store.delete_row(3), Err(CoreError::RowOutOfRange(3))));
    assert_eq!(LedgerService::load(&store).unwrap().len(), 1);
}

#[test]
fn reset_for_a_day_goes_through_the_sheet() {
    let dir = tempdir().unwrap();
    let store = JsonSheetStore::open_or_create(dir.path().join("ledger.json"), "t").unwrap();
    for label in ["a", "b", "c"] {
        TransactionService::add(&store, &expense(label, 2.0)).unwrap();
    }
    let snapshot = LedgerService::load(&store).unwrap();
    let deleted = TransactionService::delete_all_for_date(&store, snapshot, date(2024, 3, 2)).unwrap();
    assert_eq!(deleted, 3);
    assert!(LedgerService::load(&store).unwrap().is_empty());
}

#[test]
fn hand_edited_sheet_with_serial_dates_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    let mut document = SheetDocument::new("Budget_Tracker");
    document.rows.push(vec![
        CellValue::Number(45352.0),
        CellValue::Text("Income".into()),
        CellValue::Text("🏦 Salary".into()),
        CellValue::Text(String::new()),
        CellValue::Text("5000".into()),
    ]);
    save_document(&document, &path).unwrap();

    let store = JsonSheetStore::open(&path).unwrap();
    let snapshot = LedgerService::load(&store).unwrap();
    assert_eq!(snapshot.transactions()[0].date, date(2024, 3, 1));
    assert_eq!(snapshot.transactions()[0].amount, 5000.0);
}

#[test]
fn corrupt_sheet_is_a_serde_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = JsonSheetStore::open(&path).unwrap();
    assert!(matches!(store.load_all(), Err(CoreError::Serde(_))));
}
