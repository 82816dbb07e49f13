//! Business logic helpers for managing expense records.

use std::cmp::Reverse;

use tracing::debug;
use tribudget_domain::{BudgetBook, Expense, ExpenseUpdate};
use uuid::Uuid;

use crate::CoreError;

/// Provides validated CRUD helpers for the expense record store.
pub struct ExpenseService;

impl ExpenseService {
    /// Adds a new expense and returns its identifier.
    pub fn add(book: &mut BudgetBook, expense: Expense) -> Result<Uuid, CoreError> {
        Self::validate_title(&expense.title)?;
        Self::validate_amount(expense.amount)?;
        if book.expense(expense.id).is_some() {
            return Err(CoreError::InvalidOperation(format!(
                "expense {} already exists",
                expense.id
            )));
        }
        let id = book.add_expense(expense);
        debug!(%id, "expense added");
        Ok(id)
    }

    /// Applies `changes` to the expense identified by `id`. The identifier itself never changes.
    pub fn update(book: &mut BudgetBook, id: Uuid, changes: ExpenseUpdate) -> Result<(), CoreError> {
        if let Some(title) = changes.title.as_deref() {
            Self::validate_title(title)?;
        }
        if let Some(amount) = changes.amount {
            Self::validate_amount(amount)?;
        }
        let expense = book.expense_mut(id).ok_or(CoreError::ExpenseNotFound(id))?;
        changes.apply(expense);
        book.touch();
        Ok(())
    }

    /// Removes the expense identified by `id`, returning the removed instance.
    pub fn remove(book: &mut BudgetBook, id: Uuid) -> Result<Expense, CoreError> {
        book.remove_expense(id).ok_or(CoreError::ExpenseNotFound(id))
    }

    /// Returns the expenses in insertion order.
    pub fn list(book: &BudgetBook) -> Vec<&Expense> {
        book.expenses.iter().collect()
    }

    /// Returns up to `limit` expenses, newest date first. Undated records sort last.
    pub fn list_recent(book: &BudgetBook, limit: usize) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = book.expenses.iter().collect();
        expenses.sort_by_key(|expense| Reverse(expense.parsed_date()));
        expenses.truncate(limit);
        expenses
    }

    fn validate_title(title: &str) -> Result<(), CoreError> {
        if title.trim().is_empty() {
            Err(CoreError::Validation("expense title must not be empty".into()))
        } else {
            Ok(())
        }
    }

    fn validate_amount(amount: f64) -> Result<(), CoreError> {
        if amount.is_finite() && amount >= 0.0 {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "expense amount must be a non-negative number, got {amount}"
            )))
        }
    }
}
