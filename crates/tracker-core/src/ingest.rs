//! Converts raw store rows into typed transactions.
//!
//! Any malformed row aborts the whole load; there is no partial ledger.

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::{debug, warn};

use tracker_domain::{Transaction, TransactionType};

use crate::{
    storage::{
        physical_row, CellValue, RawRow, AMOUNT_COLUMN, CATEGORY_COLUMN, DATE_COLUMN,
        DESCRIPTION_COLUMN, TYPE_COLUMN,
    },
    CoreError,
};

const REQUIRED_COLUMNS: [&str; 4] = [DATE_COLUMN, TYPE_COLUMN, CATEGORY_COLUMN, AMOUNT_COLUMN];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parses every row, assigning logical indices in load order.
pub fn parse_rows(rows: &[RawRow]) -> Result<Vec<Transaction>, CoreError> {
    let transactions = rows
        .iter()
        .enumerate()
        .map(|(index, row)| parse_row(index, row))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = transactions.len(), "parsed ledger rows");
    Ok(transactions)
}

fn parse_row(index: usize, row: &RawRow) -> Result<Transaction, CoreError> {
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|col| !row.has_column(col)) {
        return Err(CoreError::MissingColumn((*missing).to_string()));
    }
    let sheet_row = physical_row(index);
    let invalid = |column: &'static str, message: String| CoreError::InvalidField {
        row: sheet_row,
        column,
        message,
    };

    let date = field(row, DATE_COLUMN)
        .ok_or_else(|| invalid(DATE_COLUMN, "missing value".into()))
        .and_then(|cell| parse_date(cell).map_err(|msg| invalid(DATE_COLUMN, msg)))?;

    let kind = match field(row, TYPE_COLUMN) {
        Some(CellValue::Text(text)) => text
            .parse::<TransactionType>()
            .map_err(|msg| invalid(TYPE_COLUMN, msg))?,
        Some(other) => return Err(invalid(TYPE_COLUMN, format!("unexpected value `{other}`"))),
        None => return Err(invalid(TYPE_COLUMN, "missing value".into())),
    };

    let amount = field(row, AMOUNT_COLUMN)
        .ok_or_else(|| invalid(AMOUNT_COLUMN, "missing value".into()))
        .and_then(|cell| parse_amount(cell).map_err(|msg| invalid(AMOUNT_COLUMN, msg)))?;

    let category = row
        .get(CATEGORY_COLUMN)
        .map(ToString::to_string)
        .unwrap_or_default();
    let description = row
        .get(DESCRIPTION_COLUMN)
        .map(ToString::to_string)
        .unwrap_or_default();

    let txn = Transaction {
        date,
        kind,
        category,
        description,
        amount,
        row_index: index,
    };
    if txn.known_category().is_none() {
        warn!(
            row = sheet_row,
            category = %txn.category,
            kind = %kind,
            "category outside the {} vocabulary",
            kind.as_str().to_lowercase()
        );
    }
    Ok(txn)
}

fn field<'a>(row: &'a RawRow, column: &str) -> Option<&'a CellValue> {
    row.get(column).filter(|cell| !cell.is_blank())
}

/// Normalizes a date cell to a calendar day, discarding any time of day.
///
/// Numbers are read as spreadsheet serial days (day 0 = 1899-12-30).
pub fn parse_date(cell: &CellValue) -> Result<NaiveDate, String> {
    match cell {
        CellValue::Number(serial) => {
            if !serial.is_finite() || *serial < 0.0 {
                return Err(format!("`{serial}` is not a serial date"));
            }
            let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
                .ok_or_else(|| "serial date epoch out of range".to_string())?;
            Duration::try_days(serial.floor() as i64)
                .and_then(|offset| epoch.checked_add_signed(offset))
                .ok_or_else(|| format!("`{serial}` is not a serial date"))
        }
        CellValue::Text(text) => parse_date_text(text.trim()),
    }
}

fn parse_date_text(text: &str) -> Result<NaiveDate, String> {
    let (day_part, time_part) = match text.find(['T', ' ']) {
        Some(split) => (&text[..split], Some(text[split + 1..].trim())),
        None => (text, None),
    };
    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day_part, fmt).ok())
        .ok_or_else(|| format!("`{text}` is not a recognised date"))?;
    if let Some(time) = time_part {
        let clock = strip_offset(time);
        if !TIME_FORMATS
            .iter()
            .any(|fmt| NaiveTime::parse_from_str(clock, fmt).is_ok())
        {
            return Err(format!("`{text}` has an unrecognised time of day"));
        }
    }
    Ok(date)
}

// Drops a trailing `Z` or `+hh:mm` / `-hh:mm` offset.
fn strip_offset(time: &str) -> &str {
    if let Some(stripped) = time.strip_suffix('Z') {
        return stripped;
    }
    match time.rfind(['+', '-']) {
        Some(pos) if pos > 0 => time[..pos].trim_end(),
        _ => time,
    }
}

/// Reads a non-negative amount from a numeric or textual cell.
pub fn parse_amount(cell: &CellValue) -> Result<f64, String> {
    let value = match cell {
        CellValue::Number(value) => *value,
        CellValue::Text(text) => {
            let cleaned: String = text.trim().chars().filter(|ch| *ch != ',').collect();
            cleaned
                .parse::<f64>()
                .map_err(|_| format!("`{text}` is not a number"))?
        }
    };
    if !value.is_finite() {
        return Err(format!("`{value}` is not a finite amount"));
    }
    if value < 0.0 {
        return Err(format!("amount {value} is negative"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(date: CellValue, kind: &str, amount: CellValue) -> RawRow {
        RawRow::new()
            .with(DATE_COLUMN, date)
            .with(TYPE_COLUMN, text(kind))
            .with(CATEGORY_COLUMN, text("🏦 Salary"))
            .with(DESCRIPTION_COLUMN, text("March"))
            .with(AMOUNT_COLUMN, amount)
    }

    #[test]
    fn date_only_and_date_time_normalize_identically() {
        let plain = parse_date(&text("2024-03-05")).unwrap();
        assert_eq!(plain, date(2024, 3, 5));
        assert_eq!(parse_date(&text("2024-03-05T00:00:00")).unwrap(), plain);
        assert_eq!(parse_date(&text("2024-03-05 18:45:10.250")).unwrap(), plain);
        assert_eq!(parse_date(&text("2024-03-05T23:59:00+05:30")).unwrap(), plain);
        assert_eq!(parse_date(&text("2024-03-05T08:00:00Z")).unwrap(), plain);
    }

    #[test]
    fn alternative_date_layouts_are_accepted() {
        assert_eq!(parse_date(&text("2024/03/05")).unwrap(), date(2024, 3, 5));
        assert_eq!(parse_date(&text("3/5/2024")).unwrap(), date(2024, 3, 5));
    }

    #[test]
    fn serial_numbers_are_spreadsheet_days() {
        assert_eq!(
            parse_date(&CellValue::Number(45356.0)).unwrap(),
            date(2024, 3, 5)
        );
        assert_eq!(
            parse_date(&CellValue::Number(45356.75)).unwrap(),
            date(2024, 3, 5)
        );
    }

    #[test]
    fn serial_dates_out_of_range_are_errors() {
        for serial in [-1.0, f64::NAN, f64::INFINITY, 1e300, 9.0e15] {
            let err = parse_date(&CellValue::Number(serial)).unwrap_err();
            assert!(err.contains("is not a serial date"), "{serial}: {err}");
        }
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!(parse_date(&text("yesterday")).is_err());
        assert!(parse_date(&text("2024-02-30")).is_err());
        assert!(parse_date(&text("2024-03-05Tnoon")).is_err());
    }

    #[test]
    fn amounts_accept_numbers_and_grouped_text() {
        assert_eq!(parse_amount(&CellValue::Number(12.5)).unwrap(), 12.5);
        assert_eq!(parse_amount(&text("1,250.75")).unwrap(), 1250.75);
        assert!(parse_amount(&text("-3")).is_err());
        assert!(parse_amount(&text("abc")).is_err());
    }

    #[test]
    fn parse_rows_assigns_logical_indices() {
        let rows = vec![
            row(text("2024-03-01"), "Income", CellValue::Number(5000.0)),
            row(text("2024-03-02"), "expense", text("200")),
        ];
        let parsed = parse_rows(&rows).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].row_index, 0);
        assert_eq!(parsed[1].row_index, 1);
        assert_eq!(parsed[1].kind, TransactionType::Expense);
        assert_eq!(parsed[1].amount, 200.0);
        assert_eq!(parsed[0].description, "March");
    }

    #[test]
    fn one_bad_date_aborts_the_whole_load() {
        let rows = vec![
            row(text("2024-03-01"), "Income", CellValue::Number(5000.0)),
            row(text(""), "Expense", CellValue::Number(1.0)),
        ];
        let err = parse_rows(&rows).unwrap_err();
        match err {
            CoreError::InvalidField { row, column, .. } => {
                assert_eq!(row, 3);
                assert_eq!(column, DATE_COLUMN);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_date_column_is_reported_by_name() {
        let rows = vec![RawRow::new()
            .with(TYPE_COLUMN, text("Income"))
            .with(CATEGORY_COLUMN, text("🏦 Salary"))
            .with(AMOUNT_COLUMN, CellValue::Number(1.0))];
        let err = parse_rows(&rows).unwrap_err();
        assert!(matches!(err, CoreError::MissingColumn(ref col) if col == "Date"));
        assert_eq!(err.to_string(), "'Date' column not found in ledger");
    }

    #[test]
    fn unknown_type_is_a_load_error() {
        let rows = vec![row(text("2024-03-01"), "Transfer", CellValue::Number(1.0))];
        assert!(matches!(
            parse_rows(&rows),
            Err(CoreError::InvalidField { column: TYPE_COLUMN, .. })
        ));
    }

    #[test]
    fn description_column_is_optional() {
        let rows = vec![RawRow::new()
            .with(DATE_COLUMN, text("2024-03-01"))
            .with(TYPE_COLUMN, text("Expense"))
            .with(CATEGORY_COLUMN, text("Groceries"))
            .with(AMOUNT_COLUMN, CellValue::Number(3.0))];
        let parsed = parse_rows(&rows).unwrap();
        assert_eq!(parsed[0].description, "");
        assert_eq!(parsed[0].category, "Groceries");
    }
}
