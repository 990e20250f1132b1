use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandFn = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// One shell command: its name, a one-line summary for `help`, and usage.
pub struct CommandEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub run: CommandFn,
}

impl CommandEntry {
    pub fn new(
        name: &'static str,
        summary: &'static str,
        usage: &'static str,
        run: CommandFn,
    ) -> Self {
        Self {
            name,
            summary,
            usage,
            run,
        }
    }
}

/// Shell commands kept in display order.
///
/// Names listed in `display_order` come first, in that order; anything else
/// follows in registration order. Lookups ignore ASCII case.
pub struct CommandRegistry {
    display_order: &'static [&'static str],
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn with_display_order(display_order: &'static [&'static str]) -> Self {
        Self {
            display_order,
            entries: Vec::new(),
        }
    }

    /// Adds `entry`, replacing any command already registered under its name.
    pub fn register(&mut self, entry: CommandEntry) {
        self.entries
            .retain(|existing| !existing.name.eq_ignore_ascii_case(entry.name));
        let rank = self.rank(entry.name);
        let slot = self
            .entries
            .iter()
            .position(|existing| self.rank(existing.name) > rank)
            .unwrap_or(self.entries.len());
        self.entries.insert(slot, entry);
    }

    fn rank(&self, name: &str) -> usize {
        self.display_order
            .iter()
            .position(|listed| listed.eq_ignore_ascii_case(name))
            .unwrap_or(self.display_order.len())
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn runner(&self, name: &str) -> Option<CommandFn> {
        self.get(name).map(|entry| entry.run)
    }
}
