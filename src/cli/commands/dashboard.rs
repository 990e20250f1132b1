use tracker_core::{CurrencyFormatter, LedgerService};

use crate::cli::commands::report::{month_title, totals_metrics};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{
    style::{Tone, UiStyle},
    widgets::{render_metrics, Metric},
};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "dashboard",
        "Show total savings and this month's summary",
        "dashboard",
        cmd_dashboard,
    )]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.load_snapshot()?;
    let dashboard = LedgerService::dashboard(&snapshot, context.today());
    let formatter = context.formatter();
    let style = UiStyle::detect();

    output::section("Personal Finance Tracker");
    render_metrics(
        &[Metric::new(
            "Total Savings",
            formatter.format_amount(dashboard.savings),
            Tone::of(dashboard.savings),
        )],
        &style,
    );

    io::print_info(format!("\nMonthly Summary: {}", month_title(dashboard.month)));
    render_metrics(&totals_metrics(&formatter, &dashboard.month_totals), &style);

    match dashboard.todays_transactions.len() {
        0 => io::print_info("No transactions recorded today."),
        count => io::print_hint(format!(
            "{count} transaction(s) recorded today. Use `today` to review them."
        )),
    }
    Ok(())
}
