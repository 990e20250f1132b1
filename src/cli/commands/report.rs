use std::str::FromStr;

use chrono::NaiveDate;

use tracker_core::{
    CurrencyFormatter, DateFormatter, IsoDateFormatter, LedgerService, LedgerSnapshot, Report,
    SummaryService, Totals,
};
use tracker_domain::{Category, MonthKey, ReportScope, Transaction, TransactionType};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::validate_date;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{
    style::{Tone, UiStyle},
    table::{Table, TableColumn, TableRenderer},
    widgets::{render_metrics, Metric},
};

const REPORT_USAGE: &str = "report <daily [YYYY-MM-DD] | monthly [YYYY-MM]>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "report",
            "Show totals for one day or one month",
            REPORT_USAGE,
            cmd_report,
        ),
        CommandEntry::new(
            "months",
            "List the months that have transactions",
            "months",
            cmd_months,
        ),
        CommandEntry::new(
            "categories",
            "List the income and expense categories",
            "categories [income|expense]",
            cmd_categories,
        ),
    ]
}

/// `March 2024` for display; falls back to `2024-03`.
pub(crate) fn month_title(month: MonthKey) -> String {
    month
        .first_day()
        .map(|day| day.format("%B %Y").to_string())
        .unwrap_or_else(|| month.to_string())
}

/// Income, expense and net widgets for one set of totals.
pub(crate) fn totals_metrics(formatter: &dyn CurrencyFormatter, totals: &Totals) -> Vec<Metric> {
    let net = totals.net();
    vec![
        Metric::new(
            "Income",
            formatter.format_amount(totals.income),
            if totals.income > 0.0 {
                Tone::Positive
            } else {
                Tone::Neutral
            },
        ),
        Metric::new(
            "Expenses",
            formatter.format_amount(totals.expense),
            if totals.expense > 0.0 {
                Tone::Negative
            } else {
                Tone::Neutral
            },
        ),
        Metric::new("Net Savings", formatter.format_amount(net), Tone::of(net)),
    ]
}

/// Resolves `report` arguments against the loaded ledger.
pub(crate) fn parse_scope(
    kind: &str,
    value: Option<&str>,
    snapshot: &LedgerSnapshot,
    today: NaiveDate,
) -> Result<ReportScope, CommandError> {
    match kind.to_ascii_lowercase().as_str() {
        "daily" | "day" => {
            let day = match value {
                Some(raw) => validate_date(raw).map_err(CommandError::InvalidArguments)?,
                None => today,
            };
            Ok(ReportScope::Day(day))
        }
        "monthly" | "month" => {
            let month = match value {
                Some(raw) => MonthKey::from_str(raw)
                    .map_err(|err| CommandError::InvalidArguments(err.to_string()))?,
                None => LedgerService::default_report_month(snapshot, today),
            };
            Ok(ReportScope::Month(month))
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown report type `{other}`; usage: {REPORT_USAGE}"
        ))),
    }
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let snapshot = context.load_snapshot()?;
    let today = context.today();
    let scope = match args.split_first() {
        Some((kind, rest)) => parse_scope(kind, rest.first().copied(), &snapshot, today)?,
        None if context.is_interactive() => prompt_scope(context, &snapshot)?,
        None => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {REPORT_USAGE}"
            )))
        }
    };
    render_report(context, &LedgerService::report(&snapshot, scope));
    Ok(())
}

fn prompt_scope(
    context: &ShellContext,
    snapshot: &LedgerSnapshot,
) -> Result<ReportScope, CommandError> {
    let today = context.today();
    let choice = io::select_item(&context.theme, "Report type", &["Daily", "Monthly"], 0)?;
    if choice == 0 {
        let default = today.format("%Y-%m-%d").to_string();
        let raw = io::prompt_text(&context.theme, "Date (YYYY-MM-DD)", Some(&default))?;
        return parse_scope("daily", Some(raw.as_str()), snapshot, today);
    }

    let months = SummaryService::available_months(snapshot.transactions());
    if months.is_empty() {
        return Ok(ReportScope::Month(LedgerService::default_report_month(
            snapshot, today,
        )));
    }
    let titles: Vec<String> = months.iter().copied().map(month_title).collect();
    let picked = io::select_item(&context.theme, "Month", &titles, titles.len() - 1)?;
    Ok(ReportScope::Month(months[picked]))
}

fn render_report(context: &ShellContext, report: &Report) {
    let title = match report.scope {
        ReportScope::Day(day) => format!("Daily Report: {}", IsoDateFormatter.format_date(day)),
        ReportScope::Month(month) => format!("Monthly Report: {}", month_title(month)),
    };
    output::section(title);

    if report.is_empty() {
        io::print_warning("No transactions for this period.");
        return;
    }

    let formatter = context.formatter();
    let style = UiStyle::detect();
    render_metrics(&totals_metrics(&formatter, &report.totals), &style);

    if report.scope.is_daily() {
        io::print_info("");
        TableRenderer::render(&transaction_table(&formatter, &report.transactions), &style);
    }
}

pub(crate) fn transaction_table(
    formatter: &dyn CurrencyFormatter,
    transactions: &[Transaction],
) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Date", 10),
        TableColumn::new("Type", 7),
        TableColumn::new("Category", 12),
        TableColumn::new("Amount", 8),
        TableColumn::new("Description", 0),
    ]);
    for txn in transactions {
        table.add_row(vec![
            IsoDateFormatter.format_date(txn.date),
            txn.kind.to_string(),
            txn.category.clone(),
            formatter.format_amount(txn.amount),
            txn.description.clone(),
        ]);
    }
    table
}

fn cmd_months(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.load_snapshot()?;
    let months = SummaryService::available_months(snapshot.transactions());
    output::section("Months with transactions");
    if months.is_empty() {
        io::print_info("No transactions recorded yet.");
        return Ok(());
    }
    for month in months.iter().rev() {
        io::print_info(format!("  {month}  {}", month_title(*month)));
    }
    Ok(())
}

fn cmd_categories(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kinds = match args.first() {
        Some(raw) => vec![raw
            .parse::<TransactionType>()
            .map_err(CommandError::InvalidArguments)?],
        None => vec![TransactionType::Income, TransactionType::Expense],
    };
    for kind in kinds {
        output::section(format!("{kind} categories"));
        for category in Category::vocabulary(kind) {
            io::print_info(format!("  {}", category.label()));
        }
    }
    Ok(())
}
