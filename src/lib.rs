#![doc(test(attr(deny(warnings))))]

//! TriBudget splits monthly income into Needs, Savings and Wants buckets and tracks
//! spending and savings goals against them.
//!
//! The heavy lifting lives in the member crates; this crate wires them into
//! [`app::BudgetApp`] and owns logging setup.

pub mod app;
pub mod errors;
pub mod utils;

use std::sync::Once;

pub use app::BudgetApp;
pub use errors::{BudgetError, Result};
pub use tribudget_config as config;
pub use tribudget_core as engine;
pub use tribudget_domain as domain;
pub use tribudget_storage_json as storage;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("TriBudget tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
