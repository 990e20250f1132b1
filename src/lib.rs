#![doc(test(attr(deny(warnings))))]

//! Budget Tracker records income and expense transactions in a ledger sheet
//! and derives savings, monthly summaries and scoped reports from it.
//!
//! The engine lives in the `tracker-*` member crates; this crate wires them
//! into the terminal front end.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Tracker tracing initialized.");
    });
}
