//! The application-owned aggregate of expenses, categories and budget configuration.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::{default_categories, Category};
use crate::common::Bucket;
use crate::expense::Expense;
use crate::goal::SavingsGoal;
use crate::profile::BudgetProfile;

/// Whether the user has finished the first-run setup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OnboardingState {
    #[default]
    NotOnboarded,
    Onboarded,
}

impl OnboardingState {
    pub fn is_onboarded(self) -> bool {
        matches!(self, OnboardingState::Onboarded)
    }
}

/// Expense records plus the registry and configuration they are measured against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetBook {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub goals: HashMap<Uuid, SavingsGoal>,
    #[serde(default)]
    pub profile: BudgetProfile,
    #[serde(default)]
    pub onboarding: OnboardingState,
    /// Identifiers of records inserted as sample data.
    #[serde(default)]
    pub sample_expense_ids: HashSet<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
            categories: Vec::new(),
            goals: HashMap::new(),
            profile: BudgetProfile::default(),
            onboarding: OnboardingState::NotOnboarded,
            sample_expense_ids: HashSet::new(),
            updated_at: Utc::now(),
        }
    }

    /// A fresh book seeded with the starter category registry.
    pub fn with_default_categories() -> Self {
        let mut book = Self::new();
        book.categories = default_categories();
        book
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|expense| expense.id == id)?;
        let removed = self.expenses.remove(index);
        self.sample_expense_ids.remove(&id);
        self.touch();
        Some(removed)
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    pub fn categories_in(&self, bucket: Bucket) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |category| category.bucket == bucket)
    }

    pub fn has_sample_data(&self) -> bool {
        !self.sample_expense_ids.is_empty()
    }
}

impl Default for BudgetBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn removing_an_expense_forgets_its_sample_marker() {
        let mut book = BudgetBook::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let id = book.add_expense(Expense::new("Coffee", 4.0, Bucket::Wants, "Dining Out", date));
        book.sample_expense_ids.insert(id);
        assert!(book.has_sample_data());

        let removed = book.remove_expense(id).expect("expense exists");
        assert_eq!(removed.id, id);
        assert!(!book.has_sample_data());
        assert!(book.expense(id).is_none());
    }

    #[test]
    fn onboarding_defaults_to_not_onboarded() {
        let book = BudgetBook::default();
        assert_eq!(book.onboarding, OnboardingState::NotOnboarded);
        assert!(!book.onboarding.is_onboarded());
    }
}
