pub mod config;
pub mod dashboard;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "dashboard",
    "add",
    "today",
    "delete",
    "reset-today",
    "report",
    "months",
    "categories",
    "config",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(dashboard::definitions());
    commands.extend(transaction::definitions());
    commands.extend(report::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

/// Every shell command, listed in the order `help` shows them.
pub(crate) fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::with_display_order(ROOT_COMMAND_ORDER);
    for entry in all_entries() {
        registry.register(entry);
    }
    registry
}
