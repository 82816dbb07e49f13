//! tribudget-domain
//!
//! Pure domain models (expenses, categories, budget rule, savings goals, reports).
//! No I/O, no storage. Only data types, parsing helpers and core enums.

pub mod book;
pub mod category;
pub mod common;
pub mod currency;
pub mod expense;
pub mod goal;
pub mod period;
pub mod profile;
pub mod summary;

pub use book::*;
pub use category::*;
pub use common::*;
pub use currency::*;
pub use expense::*;
pub use goal::*;
pub use period::*;
pub use profile::*;
pub use summary::*;
