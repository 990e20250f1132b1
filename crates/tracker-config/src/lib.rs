//! tracker-config
//!
//! Persistent user preferences for the budget tracker.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{default_home, ConfigManager, HOME_ENV};
pub use model::Config;
