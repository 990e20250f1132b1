use chrono::NaiveDate;

use tracker_core::{CurrencyFormatter, RowRef, TransactionService};
use tracker_domain::{Category, NewTransaction, Transaction, TransactionType};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::{self, validate_amount, validate_date};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::TodayListing;

const ADD_USAGE: &str = "add [YYYY-MM-DD] <income|expense> <category> <amount> [description]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an income or expense transaction",
            ADD_USAGE,
            cmd_add,
        ),
        CommandEntry::new(
            "today",
            "List today's transactions with their row index",
            "today",
            cmd_today,
        ),
        CommandEntry::new(
            "delete",
            "Delete one of the rows listed by `today`",
            "delete <index>",
            cmd_delete,
        ),
        CommandEntry::new(
            "reset-today",
            "Delete every transaction dated today",
            "reset-today [--yes]",
            cmd_reset_today,
        ),
    ]
}

/// Builds a transaction from typed `add` arguments. The date is optional and
/// defaults to `today`; everything after the amount is the description.
pub(crate) fn parse_add_args(
    args: &[&str],
    today: NaiveDate,
    symbol: &str,
) -> Result<NewTransaction, CommandError> {
    let (date, rest) = match args
        .split_first()
        .map(|(first, rest)| (validate_date(first), rest))
    {
        Some((Ok(date), rest)) => (date, rest),
        _ => (today, args),
    };
    let [kind, category, amount, description @ ..] = rest else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };

    let kind = kind
        .parse::<TransactionType>()
        .map_err(CommandError::InvalidArguments)?;
    let category = Category::parse_for(kind, category).ok_or_else(|| {
        let choices: Vec<&str> = Category::vocabulary(kind)
            .into_iter()
            .map(Category::name)
            .collect();
        CommandError::InvalidArguments(format!(
            "`{category}` is not an {} category. Choose one of: {}",
            kind.as_str().to_lowercase(),
            choices.join(", ")
        ))
    })?;
    let amount = validate_amount(amount, symbol).map_err(CommandError::InvalidArguments)?;

    Ok(NewTransaction::new(
        date,
        kind,
        category,
        description.join(" "),
        amount,
    )?)
}

/// `Category | $Amount | Description`, the line used to pick rows.
pub(crate) fn listing_line(formatter: &dyn CurrencyFormatter, txn: &Transaction) -> String {
    format!(
        "{} | {} | {}",
        txn.category,
        formatter.format_amount(txn.amount),
        txn.description
    )
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let symbol = context.config.currency_symbol.clone();
    let transaction = if args.is_empty() && context.is_interactive() {
        match forms::prompt_transaction(&context.theme, context.today(), &symbol)? {
            Some(transaction) => transaction,
            None => {
                io::print_info("Transaction discarded.");
                return Ok(());
            }
        }
    } else {
        parse_add_args(args, context.today(), &symbol)?
    };

    context.listing = None;
    TransactionService::add(context.store.as_ref(), &transaction)?;
    io::print_success(format!(
        "Added {} {} of {} on {}.",
        transaction.kind().as_str().to_lowercase(),
        transaction.category().label(),
        context.formatter().format_amount(transaction.amount()),
        transaction.date()
    ));
    Ok(())
}

fn cmd_today(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.load_snapshot()?;
    let today = context.today();
    let formatter = context.formatter();

    output::section(format!("Today's Transactions ({today})"));
    let rows = snapshot.rows_on(today);
    if rows.is_empty() {
        io::print_info("No transactions recorded today.");
        context.listing = None;
        return Ok(());
    }
    for row in &rows {
        let txn = snapshot.get(*row)?;
        io::print_info(format!("  [{}] {}", row.index(), listing_line(&formatter, txn)));
    }
    io::print_hint("Delete one with `delete <index>` or all of them with `reset-today`.");
    context.listing = Some(TodayListing {
        snapshot,
        date: today,
    });
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let row = {
        let listing = context.listing.as_ref().ok_or_else(|| {
            CommandError::InvalidArguments(
                "Run `today` first to list the rows you can delete.".into(),
            )
        })?;
        pick_row(context, listing, args.first().copied())?
    };
    let Some(row) = row else {
        io::print_info("Nothing deleted.");
        return Ok(());
    };

    let Some(listing) = context.listing.take() else {
        return Err(CommandError::Message("today's listing is no longer available".into()));
    };
    let removed = TransactionService::delete(context.store.as_ref(), listing.snapshot, row)?;
    io::print_success(format!(
        "Deleted: {}",
        listing_line(&context.formatter(), &removed)
    ));
    Ok(())
}

/// Resolves the row to delete from an explicit index, or by asking.
fn pick_row(
    context: &ShellContext,
    listing: &TodayListing,
    index: Option<&str>,
) -> Result<Option<RowRef>, CommandError> {
    let rows = listing.snapshot.rows_on(listing.date);
    match index {
        Some(raw) => {
            let wanted = raw.parse::<usize>().map_err(|_| {
                CommandError::InvalidArguments(format!("`{raw}` is not a row index"))
            })?;
            rows.into_iter()
                .find(|row| row.index() == wanted)
                .map(Some)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "Row {wanted} is not in today's listing."
                    ))
                })
        }
        None if context.is_interactive() => {
            let formatter = context.formatter();
            let mut labels = Vec::with_capacity(rows.len() + 1);
            for row in &rows {
                let txn = listing.snapshot.get(*row)?;
                labels.push(format!("[{}] {}", row.index(), listing_line(&formatter, txn)));
            }
            labels.push("Cancel".to_string());
            let picked = io::select_item(&context.theme, "Delete which row?", &labels, 0)?;
            Ok(rows.get(picked).copied())
        }
        None => Err(CommandError::InvalidArguments("usage: delete <index>".into())),
    }
}

fn cmd_reset_today(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let snapshot = context.load_snapshot()?;
    let today = context.today();
    let count = snapshot.rows_on(today).len();
    if count == 0 {
        io::print_info("No transactions recorded today.");
        return Ok(());
    }

    let assume_yes = args
        .iter()
        .any(|arg| matches!(*arg, "--yes" | "-y" | "yes"));
    let confirmed = if assume_yes {
        true
    } else if context.is_interactive() {
        io::confirm_action(
            &context.theme,
            &format!("Delete all {count} transaction(s) dated {today}?"),
            false,
        )?
    } else {
        return Err(CommandError::InvalidArguments(
            "reset-today deletes rows; pass --yes to confirm".into(),
        ));
    };
    if !confirmed {
        io::print_info("Reset cancelled.");
        return Ok(());
    }

    context.listing = None;
    let deleted = TransactionService::delete_all_for_date(context.store.as_ref(), snapshot, today)?;
    io::print_success(format!("Deleted {deleted} transaction(s) dated {today}."));
    Ok(())
}
