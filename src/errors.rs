use std::result::Result as StdResult;

use thiserror::Error;
use tribudget_config::ConfigError;
use tribudget_core::CoreError;

/// Unified error type for the core, configuration and storage layers.
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<CoreError> for BudgetError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ExpenseNotFound(id) => BudgetError::ExpenseNotFound(id.to_string()),
            CoreError::CategoryNotFound(id) => BudgetError::CategoryNotFound(id.to_string()),
            CoreError::InvalidOperation(message) | CoreError::Validation(message) => {
                BudgetError::InvalidInput(message)
            }
            CoreError::Storage(message) | CoreError::Serde(message) => {
                BudgetError::StorageError(message)
            }
        }
    }
}

impl From<ConfigError> for BudgetError {
    fn from(err: ConfigError) -> Self {
        BudgetError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn core_errors_map_to_budget_variants() {
        let id = Uuid::new_v4();
        assert!(matches!(
            BudgetError::from(CoreError::ExpenseNotFound(id)),
            BudgetError::ExpenseNotFound(text) if text == id.to_string()
        ));
        assert!(matches!(
            BudgetError::from(CoreError::Validation("bad".into())),
            BudgetError::InvalidInput(_)
        ));
        assert!(matches!(
            BudgetError::from(ConfigError::BackupNotFound("x".into())),
            BudgetError::ConfigError(_)
        ));
    }
}
