//! Key-value persistence gate for budget books.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;
use tribudget_domain::{default_categories, BudgetBook};

use crate::CoreError;

/// Abstraction over string key-value stores (device storage, files, memory).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
    fn keys(&self) -> Result<Vec<String>, CoreError>;
}

/// In-process store, mainly for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, CoreError> {
        self.entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

const EXPENSES_KEY: &str = "expenses";
const CATEGORIES_KEY: &str = "categories";
const GOALS_KEY: &str = "goals";
const PROFILE_KEY: &str = "profile";
const ONBOARDING_KEY: &str = "onboarding";
const SAMPLE_IDS_KEY: &str = "sample_ids";
const UPDATED_AT_KEY: &str = "updated_at";

const BOOK_KEYS: &[&str] = &[
    EXPENSES_KEY,
    CATEGORIES_KEY,
    GOALS_KEY,
    PROFILE_KEY,
    ONBOARDING_KEY,
    SAMPLE_IDS_KEY,
    UPDATED_AT_KEY,
];

/// Result of loading a book, with a note for every key that fell back to its default.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub book: BudgetBook,
    pub warnings: Vec<String>,
}

/// Reads and writes a [`BudgetBook`] as one JSON value per key.
///
/// Loading never fails: a missing, unreadable or corrupt key is replaced by its default.
pub struct BookRepository<S: KeyValueStore> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> BookRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, "tribudget")
    }

    pub fn with_prefix(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> BudgetBook {
        self.load_report().book
    }

    pub fn load_report(&self) -> LoadReport {
        let mut warnings = Vec::new();
        let defaults = BudgetBook::new();
        let book = BudgetBook {
            expenses: self
                .read(EXPENSES_KEY, &mut warnings)
                .unwrap_or(defaults.expenses),
            categories: self
                .read(CATEGORIES_KEY, &mut warnings)
                .unwrap_or_else(default_categories),
            goals: self.read(GOALS_KEY, &mut warnings).unwrap_or(defaults.goals),
            profile: self
                .read(PROFILE_KEY, &mut warnings)
                .unwrap_or(defaults.profile),
            onboarding: self
                .read(ONBOARDING_KEY, &mut warnings)
                .unwrap_or(defaults.onboarding),
            sample_expense_ids: self
                .read(SAMPLE_IDS_KEY, &mut warnings)
                .unwrap_or(defaults.sample_expense_ids),
            updated_at: self
                .read(UPDATED_AT_KEY, &mut warnings)
                .unwrap_or(defaults.updated_at),
        };
        LoadReport { book, warnings }
    }

    pub fn save(&self, book: &BudgetBook) -> Result<(), CoreError> {
        self.write(EXPENSES_KEY, &book.expenses)?;
        self.write(CATEGORIES_KEY, &book.categories)?;
        self.write(GOALS_KEY, &book.goals)?;
        self.write(PROFILE_KEY, &book.profile)?;
        self.write(ONBOARDING_KEY, &book.onboarding)?;
        self.write(SAMPLE_IDS_KEY, &book.sample_expense_ids)?;
        self.write(UPDATED_AT_KEY, &book.updated_at)?;
        Ok(())
    }

    /// Removes every key this repository owns.
    pub fn clear(&self) -> Result<(), CoreError> {
        for key in BOOK_KEYS {
            self.store.remove(&self.key(key))?;
        }
        Ok(())
    }

    fn key(&self, name: &str) -> String {
        format!("{}:{}", self.prefix, name)
    }

    fn read<T: DeserializeOwned>(&self, name: &str, warnings: &mut Vec<String>) -> Option<T> {
        let key = self.key(name);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(%key, %err, "store read failed; using default");
                warnings.push(format!("{key}: {err}"));
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%key, %err, "stored value is corrupt; using default");
                warnings.push(format!("{key}: {err}"));
                None
            }
        }
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<(), CoreError> {
        let json = serde_json::to_string(value)?;
        self.store.set(&self.key(name), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tribudget_domain::{Bucket, Expense, OnboardingState};

    #[test]
    fn empty_store_loads_defaults() {
        let repo = BookRepository::new(MemoryStore::new());
        let report = repo.load_report();
        assert!(report.warnings.is_empty());
        assert!(report.book.expenses.is_empty());
        assert!(!report.book.categories.is_empty());
        assert_eq!(report.book.onboarding, OnboardingState::NotOnboarded);
    }

    #[test]
    fn saves_and_reloads_book() {
        let repo = BookRepository::new(MemoryStore::new());
        let mut book = BudgetBook::with_default_categories();
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        book.add_expense(Expense::new("Bus", 2.5, Bucket::Needs, "Transport", date));
        book.profile.income = 2800.0;
        book.onboarding = OnboardingState::Onboarded;
        repo.save(&book).unwrap();

        let loaded = repo.load();
        assert_eq!(loaded, book);
    }

    #[test]
    fn corrupt_key_falls_back_and_reports() {
        let repo = BookRepository::new(MemoryStore::new());
        repo.save(&BudgetBook::new()).unwrap();
        repo.store().set("tribudget:profile", "{not json").unwrap();

        let report = repo.load_report();
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("tribudget:profile"));
        assert_eq!(report.book.profile.income, 0.0);
    }

    #[test]
    fn clear_removes_owned_keys_only() {
        let repo = BookRepository::new(MemoryStore::new());
        repo.save(&BudgetBook::new()).unwrap();
        repo.store().set("other:key", "1").unwrap();
        repo.clear().unwrap();
        assert_eq!(repo.store().keys().unwrap(), vec!["other:key".to_string()]);
    }
}
