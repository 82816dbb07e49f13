use std::collections::HashMap;
use std::sync::RwLock;

use tribudget_core::storage::{BookRepository, KeyValueStore};
use tribudget_core::CoreError;
use tribudget_domain::{default_categories, BudgetBook, BudgetRule, OnboardingState};

/// Store whose reads fail for a chosen set of keys.
#[derive(Default)]
struct FlakyStore {
    entries: RwLock<HashMap<String, String>>,
    broken: Vec<String>,
}

impl FlakyStore {
    fn breaking(keys: &[&str]) -> Self {
        Self {
            entries: RwLock::default(),
            broken: keys.iter().map(|key| key.to_string()).collect(),
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        if self.broken.iter().any(|broken| broken == key) {
            return Err(CoreError::Storage(format!("device read failed for {key}")));
        }
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.entries.read().unwrap().keys().cloned().collect())
    }
}

#[test]
fn failing_reads_fall_back_per_key() {
    let repo = BookRepository::with_prefix(
        FlakyStore::breaking(&["budget:categories", "budget:onboarding"]),
        "budget",
    );
    let mut book = BudgetBook::new();
    book.profile.income = 4200.0;
    book.profile.rule = BudgetRule::new(60, 20, 20);
    book.onboarding = OnboardingState::Onboarded;
    repo.save(&book).expect("save book");

    let report = repo.load_report();
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(report.book.profile, book.profile);
    assert_eq!(report.book.onboarding, OnboardingState::NotOnboarded);
    assert_eq!(report.book.categories.len(), default_categories().len());
}

#[test]
fn values_are_plain_json_under_prefixed_keys() {
    let repo = BookRepository::with_prefix(FlakyStore::default(), "budget");
    repo.save(&BudgetBook::new()).expect("save book");

    let mut keys = repo.store().keys().unwrap();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "budget:categories",
            "budget:expenses",
            "budget:goals",
            "budget:onboarding",
            "budget:profile",
            "budget:sample_ids",
            "budget:updated_at",
        ]
    );
    let onboarding = repo.store().get("budget:onboarding").unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&onboarding).unwrap();
    assert!(parsed.is_string());
}
