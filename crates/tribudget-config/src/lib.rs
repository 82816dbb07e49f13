//! tribudget-config
//!
//! Display and storage preferences for the budget engine.
//! Owns the Settings data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Settings;
