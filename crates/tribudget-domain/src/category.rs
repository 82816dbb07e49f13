//! Domain types representing spending categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A user-facing subcategory classified into exactly one bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub bucket: Bucket,
}

impl Category {
    pub fn new(name: impl Into<String>, bucket: Bucket) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: String::new(),
            bucket,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Returns `true` when `label` names this category, ignoring case.
    pub fn matches_name(&self, label: &str) -> bool {
        name_key(&self.name) == name_key(label)
    }
}

const DEFAULT_CATEGORIES: &[(&str, &str, Bucket)] = &[
    ("Rent", "🏠", Bucket::Needs),
    ("Groceries", "🛒", Bucket::Needs),
    ("Utilities", "💡", Bucket::Needs),
    ("Transport", "🚌", Bucket::Needs),
    ("Emergency Fund", "🛟", Bucket::Savings),
    ("Investments", "📈", Bucket::Savings),
    ("Dining Out", "🍽️", Bucket::Wants),
    ("Entertainment", "🎬", Bucket::Wants),
    ("Shopping", "🛍️", Bucket::Wants),
];

/// Starter categories offered to new users.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, icon, bucket)| Category::new(*name, *bucket).with_icon(*icon))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_bucket() {
        let categories = default_categories();
        for bucket in Bucket::ALL {
            assert!(categories.iter().any(|c| c.bucket == bucket), "{bucket} missing");
        }
    }

    #[test]
    fn default_ids_are_unique() {
        let categories = default_categories();
        let mut ids: Vec<_> = categories.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), categories.len());
    }

    #[test]
    fn name_matching_ignores_case_and_padding() {
        let groceries = Category::new("Groceries", Bucket::Needs);
        assert!(groceries.matches_name("groceries"));
        assert!(groceries.matches_name(" GROCERIES "));
        assert!(!groceries.matches_name("Grocery"));
    }
}
