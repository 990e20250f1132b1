use tracker_config::Config;
use tracker_storage_json::JsonSheetStore;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::apply_output_preferences;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        "config [<key> [<value>]]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            for key in Config::KEYS {
                io::print_info(format!("  {:<18} {}", key, context.config.get(key)?));
            }
            io::print_info(format!(
                "  {:<18} {}",
                "(ledger file)",
                context.ledger_path.display()
            ));
            io::print_info(format!(
                "  {:<18} {}",
                "(config file)",
                context.config_manager.config_path().display()
            ));
            Ok(())
        }
        [key] => {
            io::print_info(format!("{} = {}", key, context.config.get(key)?));
            Ok(())
        }
        [key, value @ ..] => set_value(context, key, &value.join(" ")),
    }
}

fn set_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;

    let ledger_path = updated.resolve_ledger_path(&context.home);
    let reopen = ledger_path != context.ledger_path;
    let store = if reopen {
        Some(JsonSheetStore::open_or_create(&ledger_path, &updated.sheet_name)?)
    } else {
        None
    };

    context.config_manager.save(&updated)?;
    apply_output_preferences(&updated);
    context.config = updated;
    if let Some(store) = store {
        context.store = Box::new(store);
        context.ledger_path = ledger_path;
        context.listing = None;
        io::print_info(format!(
            "Now using ledger {}.",
            context.ledger_path.display()
        ));
    }

    io::print_success(format!(
        "Updated `{}` to {}.",
        key,
        context.config.get(key)?
    ));
    Ok(())
}
