//! tracker-domain
//!
//! Pure domain models for the budget tracker: transactions, the fixed category
//! vocabularies and the period keys reports are scoped by.
//! No I/O, no CLI, no storage.

pub mod category;
pub mod period;
pub mod transaction;

pub use category::*;
pub use period::*;
pub use transaction::*;
