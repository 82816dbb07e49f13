//! tribudget-core
//!
//! Budget aggregation engine and the services that maintain a budget book.
//! Depends on tribudget-domain. No terminal I/O; persistence goes through [`storage::KeyValueStore`].

pub mod allocation_service;
pub mod category_service;
pub mod error;
pub mod expense_service;
pub mod format;
pub mod goal_service;
pub mod onboarding_service;
pub mod period_service;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use allocation_service::*;
pub use category_service::*;
pub use error::CoreError;
pub use expense_service::*;
pub use format::*;
pub use goal_service::*;
pub use onboarding_service::*;
pub use period_service::*;
pub use summary_service::*;
pub use time::*;
