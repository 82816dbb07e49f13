//! Report types produced by the allocation calculator.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Bucket;
use crate::period::YearMonth;

/// Spending for one configured category inside a bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBreakdown {
    pub category_id: Uuid,
    pub name: String,
    pub icon: String,
    pub spent: f64,
    /// Only populated in limit mode.
    pub limit: Option<f64>,
    pub is_over_limit: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Describes where spending sits relative to a bucket target.
pub enum BucketStatus {
    UnderBudget,
    AtBudget,
    OverBudget,
    Unbudgeted,
}

impl fmt::Display for BucketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BucketStatus::UnderBudget => "Under Budget",
            BucketStatus::AtBudget => "At Budget",
            BucketStatus::OverBudget => "Over Budget",
            BucketStatus::Unbudgeted => "Unbudgeted",
        };
        f.write_str(label)
    }
}

/// Totals for one of the three buckets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BucketSummary {
    pub bucket: Bucket,
    pub target: f64,
    pub spent: f64,
    /// `target - spent`; negative when over budget.
    pub remaining: f64,
    /// Progress-bar value, clamped to 0..=100 and zero for a zero target.
    pub percent_used: f64,
    pub categories: Vec<CategoryBreakdown>,
    /// Spending in this bucket whose subcategory matches no configured category.
    pub unassigned_spent: f64,
}

impl BucketSummary {
    pub fn from_parts(
        bucket: Bucket,
        target: f64,
        spent: f64,
        categories: Vec<CategoryBreakdown>,
        unassigned_spent: f64,
    ) -> Self {
        let percent_used = if target > 0.0 {
            (spent / target * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            bucket,
            target,
            spent,
            remaining: target - spent,
            percent_used,
            categories,
            unassigned_spent,
        }
    }

    /// Unclamped `spent / target` ratio; zero when there is no target.
    pub fn raw_ratio(&self) -> f64 {
        if self.target > 0.0 {
            self.spent / self.target
        } else {
            0.0
        }
    }

    pub fn raw_percent(&self) -> f64 {
        self.raw_ratio() * 100.0
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }

    pub fn status(&self) -> BucketStatus {
        if self.target <= 0.0 {
            BucketStatus::Unbudgeted
        } else if self.spent > self.target {
            BucketStatus::OverBudget
        } else if self.spent == self.target {
            BucketStatus::AtBudget
        } else {
            BucketStatus::UnderBudget
        }
    }
}

/// Complete allocation for a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationReport {
    pub period: Option<YearMonth>,
    pub buckets: Vec<BucketSummary>,
    pub total_target: f64,
    pub total_spent: f64,
    /// Set when the rule's percentages do not add up to 100.
    pub rule_total_mismatch: bool,
    pub limit_mode: bool,
}

impl AllocationReport {
    pub fn bucket(&self, bucket: Bucket) -> Option<&BucketSummary> {
        self.buckets.iter().find(|summary| summary.bucket == bucket)
    }

    pub fn total_remaining(&self) -> f64 {
        self.total_target - self.total_spent
    }

    pub fn over_budget_buckets(&self) -> Vec<Bucket> {
        self.buckets
            .iter()
            .filter(|summary| summary.is_over_budget())
            .map(|summary| summary.bucket)
            .collect()
    }

    pub fn over_limit_categories(&self) -> Vec<&CategoryBreakdown> {
        self.buckets
            .iter()
            .flat_map(|summary| summary.categories.iter())
            .filter(|row| row.is_over_limit)
            .collect()
    }
}

/// Spending total for a calendar month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PeriodTotal {
    pub period: YearMonth,
    pub spent: f64,
    pub records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_target_has_zero_ratios() {
        let summary = BucketSummary::from_parts(Bucket::Wants, 0.0, 45.0, Vec::new(), 45.0);
        assert_eq!(summary.percent_used, 0.0);
        assert_eq!(summary.raw_ratio(), 0.0);
        assert_eq!(summary.remaining, -45.0);
        assert_eq!(summary.status(), BucketStatus::Unbudgeted);
    }

    #[test]
    fn percent_used_is_clamped_but_raw_ratio_is_not() {
        let summary = BucketSummary::from_parts(Bucket::Needs, 100.0, 150.0, Vec::new(), 0.0);
        assert_eq!(summary.percent_used, 100.0);
        assert_eq!(summary.raw_percent(), 150.0);
        assert!(summary.is_over_budget());
        assert_eq!(summary.status(), BucketStatus::OverBudget);
    }
}
