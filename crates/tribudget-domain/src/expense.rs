//! Domain model for logged expenses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;
use crate::period::{parse_record_date, YearMonth};

/// A single logged expense.
///
/// `bucket` and `date` keep the stored text verbatim so records written by older clients
/// survive a load/save cycle even when they no longer parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub bucket: String,
    pub subcategory: String,
    pub date: String,
    #[serde(default)]
    pub icon: String,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        bucket: Bucket,
        subcategory: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            bucket: bucket.to_string(),
            subcategory: subcategory.into(),
            date: date.format("%Y-%m-%d").to_string(),
            icon: String::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Returns the bucket when the stored label is one of Needs/Savings/Wants.
    pub fn resolved_bucket(&self) -> Option<Bucket> {
        Bucket::parse_label(&self.bucket)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_record_date(&self.date)
    }

    pub fn period(&self) -> Option<YearMonth> {
        self.parsed_date().map(YearMonth::of)
    }

    /// Amount usable in sums: invalid or negative values count as zero.
    pub fn effective_amount(&self) -> f64 {
        sanitize_amount(self.amount)
    }
}

/// Partial update applied to an existing expense. The identifier is never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub bucket: Option<Bucket>,
    pub subcategory: Option<String>,
    pub date: Option<NaiveDate>,
    pub icon: Option<String>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply(self, expense: &mut Expense) {
        if let Some(title) = self.title {
            expense.title = title;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(bucket) = self.bucket {
            expense.bucket = bucket.to_string();
        }
        if let Some(subcategory) = self.subcategory {
            expense.subcategory = subcategory;
        }
        if let Some(date) = self.date {
            expense.date = date.format("%Y-%m-%d").to_string();
        }
        if let Some(icon) = self.icon {
            expense.icon = icon;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Expense {
        Expense::new(
            "Weekly shop",
            84.5,
            Bucket::Needs,
            "Groceries",
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
        )
    }

    #[test]
    fn unknown_bucket_labels_survive_serialization() {
        let mut expense = sample();
        expense.bucket = "Luxuries".into();
        let json = serde_json::to_string(&expense).unwrap();
        let restored: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.bucket, "Luxuries");
        assert_eq!(restored.resolved_bucket(), None);
    }

    #[test]
    fn update_leaves_id_untouched() {
        let mut expense = sample();
        let id = expense.id;
        ExpenseUpdate {
            title: Some("Big shop".into()),
            bucket: Some(Bucket::Wants),
            ..ExpenseUpdate::default()
        }
        .apply(&mut expense);
        assert_eq!(expense.id, id);
        assert_eq!(expense.title, "Big shop");
        assert_eq!(expense.resolved_bucket(), Some(Bucket::Wants));
        assert_eq!(expense.subcategory, "Groceries");
    }
}
