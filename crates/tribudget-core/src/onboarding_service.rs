//! First-run setup and sample data, kept as separate concerns.

use chrono::{Datelike, NaiveDate};
use tracing::info;
use tribudget_domain::{default_categories, Bucket, BudgetBook, BudgetRule, Expense, OnboardingState};

use crate::CoreError;

const SAMPLE_EXPENSES: &[(&str, f64, Bucket, &str, u32)] = &[
    ("Monthly rent", 1200.0, Bucket::Needs, "Rent", 1),
    ("Supermarket", 86.4, Bucket::Needs, "Groceries", 3),
    ("Electricity bill", 64.0, Bucket::Needs, "Utilities", 5),
    ("Transfer to savings", 300.0, Bucket::Savings, "Emergency Fund", 6),
    ("Pizza night", 32.5, Bucket::Wants, "Dining Out", 8),
    ("Cinema tickets", 24.0, Bucket::Wants, "Entertainment", 12),
];

pub struct OnboardingService;

impl OnboardingService {
    /// Stores the user's income and rule and marks onboarding complete.
    ///
    /// Seeds the starter categories when the registry is still empty.
    pub fn complete(book: &mut BudgetBook, income: f64, rule: BudgetRule) -> Result<(), CoreError> {
        if book.onboarding.is_onboarded() {
            return Err(CoreError::InvalidOperation("onboarding already completed".into()));
        }
        if !(income.is_finite() && income >= 0.0) {
            return Err(CoreError::Validation(format!(
                "income must be a non-negative number, got {income}"
            )));
        }
        if book.categories.is_empty() {
            book.categories = default_categories();
        }
        book.profile.income = income;
        book.profile.rule = rule;
        book.onboarding = OnboardingState::Onboarded;
        book.touch();
        info!(income, "onboarding completed");
        Ok(())
    }

    /// Returns the book to the first-run state without touching records.
    pub fn reset(book: &mut BudgetBook) {
        book.onboarding = OnboardingState::NotOnboarded;
        book.touch();
    }

    /// Inserts demo expenses dated in the month of `today`. Returns how many were added;
    /// zero when sample data is already present.
    pub fn seed_sample_data(book: &mut BudgetBook, today: NaiveDate) -> usize {
        if book.has_sample_data() {
            return 0;
        }
        let mut added = 0;
        for (title, amount, bucket, subcategory, day) in SAMPLE_EXPENSES {
            let Some(date) = today.with_day(*day) else {
                continue;
            };
            let id = book.add_expense(Expense::new(*title, *amount, *bucket, *subcategory, date));
            book.sample_expense_ids.insert(id);
            added += 1;
        }
        info!(added, "sample data seeded");
        added
    }

    /// Removes exactly the records inserted by [`OnboardingService::seed_sample_data`].
    pub fn clear_sample_data(book: &mut BudgetBook) -> usize {
        let ids = std::mem::take(&mut book.sample_expense_ids);
        let before = book.expenses.len();
        book.expenses.retain(|expense| !ids.contains(&expense.id));
        let removed = before - book.expenses.len();
        if removed > 0 {
            book.touch();
            info!(removed, "sample data cleared");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 20).unwrap()
    }

    #[test]
    fn completing_onboarding_is_independent_of_sample_data() {
        let mut book = BudgetBook::new();
        OnboardingService::complete(&mut book, 3500.0, BudgetRule::default()).unwrap();
        assert!(book.onboarding.is_onboarded());
        assert!(!book.has_sample_data());
        assert!(!book.categories.is_empty());
        assert!(OnboardingService::complete(&mut book, 1.0, BudgetRule::default()).is_err());
    }

    #[test]
    fn rejects_negative_income() {
        let mut book = BudgetBook::new();
        let err = OnboardingService::complete(&mut book, -10.0, BudgetRule::default())
            .expect_err("negative income");
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(!book.onboarding.is_onboarded());
    }

    #[test]
    fn seeding_is_idempotent_and_clearing_keeps_user_records() {
        let mut book = BudgetBook::new();
        let mine = book.add_expense(Expense::new("Mine", 10.0, Bucket::Wants, "Shopping", today()));

        let added = OnboardingService::seed_sample_data(&mut book, today());
        assert_eq!(added, SAMPLE_EXPENSES.len());
        assert_eq!(OnboardingService::seed_sample_data(&mut book, today()), 0);
        assert!(book
            .expenses
            .iter()
            .all(|e| e.parsed_date().map(|d| d.format("%Y-%m").to_string())
                == Some("2025-02".into())));

        let removed = OnboardingService::clear_sample_data(&mut book);
        assert_eq!(removed, SAMPLE_EXPENSES.len());
        assert_eq!(book.expenses.len(), 1);
        assert!(book.expense(mine).is_some());
        assert!(!book.has_sample_data());
        assert_eq!(book.onboarding, OnboardingState::NotOnboarded);
    }

    #[test]
    fn reset_keeps_records_and_allows_onboarding_again() {
        let mut book = BudgetBook::new();
        OnboardingService::complete(&mut book, 1800.0, BudgetRule::default()).unwrap();
        OnboardingService::seed_sample_data(&mut book, today());
        let categories = book.categories.len();

        OnboardingService::reset(&mut book);
        assert_eq!(book.onboarding, OnboardingState::NotOnboarded);
        assert!(book.has_sample_data());
        assert_eq!(book.categories.len(), categories);

        OnboardingService::complete(&mut book, 2000.0, BudgetRule::default()).unwrap();
        assert_eq!(book.categories.len(), categories);
        assert_eq!(book.profile.income, 2000.0);
    }
}
