//! Category registry maintenance, limits and savings goals.

use tracing::debug;
use tribudget_domain::{Bucket, BudgetBook, Category, SavingsGoal};
use uuid::Uuid;

use crate::CoreError;

pub struct CategoryService;

impl CategoryService {
    /// Registers a category. Only identifiers must be unique; names may repeat.
    pub fn add(book: &mut BudgetBook, category: Category) -> Result<Uuid, CoreError> {
        Self::validate_name(&category.name)?;
        if book.category(category.id).is_some() {
            return Err(CoreError::InvalidOperation(format!(
                "category {} already exists",
                category.id
            )));
        }
        Ok(book.add_category(category))
    }

    /// Replaces name, icon and bucket of an existing category.
    ///
    /// Moving a category out of the Savings bucket drops its goal.
    pub fn update(book: &mut BudgetBook, id: Uuid, changes: Category) -> Result<(), CoreError> {
        Self::validate_name(&changes.name)?;
        let category = book
            .category_mut(id)
            .ok_or(CoreError::CategoryNotFound(id))?;
        category.name = changes.name;
        category.icon = changes.icon;
        category.bucket = changes.bucket;
        if changes.bucket != Bucket::Savings && book.goals.remove(&id).is_some() {
            debug!(%id, "category left the savings bucket; goal dropped");
        }
        book.touch();
        Ok(())
    }

    /// Removes a category together with its limit and goal. Expenses keep their labels.
    pub fn remove(book: &mut BudgetBook, id: Uuid) -> Result<Category, CoreError> {
        let index = book
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or(CoreError::CategoryNotFound(id))?;
        let removed = book.categories.remove(index);
        book.profile.category_limits.remove(&id);
        book.goals.remove(&id);
        book.touch();
        Ok(removed)
    }

    pub fn list(book: &BudgetBook) -> Vec<&Category> {
        book.categories.iter().collect()
    }

    pub fn by_bucket(book: &BudgetBook, bucket: Bucket) -> Vec<&Category> {
        book.categories_in(bucket).collect()
    }

    /// First category whose name matches `name`, ignoring case.
    pub fn find_by_name<'a>(book: &'a BudgetBook, name: &str) -> Option<&'a Category> {
        book.categories
            .iter()
            .find(|category| category.matches_name(name))
    }

    pub fn set_limit(book: &mut BudgetBook, id: Uuid, amount: f64) -> Result<(), CoreError> {
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(CoreError::Validation(format!(
                "category limit must be a non-negative number, got {amount}"
            )));
        }
        Self::require(book, id)?;
        book.profile.category_limits.insert(id, amount);
        book.touch();
        Ok(())
    }

    pub fn clear_limit(book: &mut BudgetBook, id: Uuid) -> Option<f64> {
        let removed = book.profile.category_limits.remove(&id);
        if removed.is_some() {
            book.touch();
        }
        removed
    }

    /// Creates or replaces the goal of a Savings category.
    pub fn set_goal(book: &mut BudgetBook, id: Uuid, goal: SavingsGoal) -> Result<(), CoreError> {
        if !(goal.amount.is_finite() && goal.amount >= 0.0) {
            return Err(CoreError::Validation(format!(
                "goal amount must be a non-negative number, got {}",
                goal.amount
            )));
        }
        let category = Self::require(book, id)?;
        if category.bucket != Bucket::Savings {
            return Err(CoreError::InvalidOperation(format!(
                "goals can only be set on savings categories; `{}` is in {}",
                category.name, category.bucket
            )));
        }
        book.goals.insert(id, goal);
        book.touch();
        Ok(())
    }

    pub fn clear_goal(book: &mut BudgetBook, id: Uuid) -> Option<SavingsGoal> {
        let removed = book.goals.remove(&id);
        if removed.is_some() {
            book.touch();
        }
        removed
    }

    fn require(book: &BudgetBook, id: Uuid) -> Result<&Category, CoreError> {
        book.category(id).ok_or(CoreError::CategoryNotFound(id))
    }

    fn validate_name(name: &str) -> Result<(), CoreError> {
        if name.trim().is_empty() {
            Err(CoreError::Validation("category name must not be empty".into()))
        } else {
            Ok(())
        }
    }
}
