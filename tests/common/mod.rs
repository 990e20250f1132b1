use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

use tracker_core::{CellValue, LedgerSnapshot, LedgerService};
use tracker_storage_json::{save_document, JsonSheetStore, SheetDocument};

pub const TODAY: &str = "2024-03-15";

/// A tracker home in a temporary directory.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn ledger_file(&self) -> std::path::PathBuf {
        self.path().join("sheets").join("Budget_Tracker.json")
    }

    /// Runs the CLI in script mode with `input` on stdin and "today" pinned.
    pub fn script(&self, input: &str) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("budget_tracker_cli").expect("binary built");
        cmd.env("BUDGET_TRACKER_CLI_SCRIPT", "1")
            .env("BUDGET_TRACKER_HOME", self.path())
            .env("BUDGET_TRACKER_TODAY", TODAY)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .write_stdin(input.to_string())
            .assert()
    }

    /// Writes a sheet directly, bypassing the CLI.
    pub fn write_sheet(&self, rows: Vec<Vec<CellValue>>) {
        let mut document = SheetDocument::new("Budget_Tracker");
        document.rows.extend(rows);
        save_document(&document, &self.ledger_file()).expect("write sheet");
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let store = JsonSheetStore::open(self.ledger_file()).expect("open sheet");
        LedgerService::load(&store).expect("load sheet")
    }
}

pub fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}
