//! Budget rule and the explicit configuration handed to the calculator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Bucket;

/// Percentage split of income across the three buckets.
///
/// The parts are expected to add up to 100 but nothing here relies on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetRule {
    pub needs: u32,
    pub savings: u32,
    pub wants: u32,
}

impl BudgetRule {
    pub fn new(needs: u32, savings: u32, wants: u32) -> Self {
        Self {
            needs,
            savings,
            wants,
        }
    }

    pub fn percentage(&self, bucket: Bucket) -> u32 {
        match bucket {
            Bucket::Needs => self.needs,
            Bucket::Savings => self.savings,
            Bucket::Wants => self.wants,
        }
    }

    pub fn total(&self) -> u32 {
        self.needs + self.savings + self.wants
    }

    pub fn is_balanced(&self) -> bool {
        self.total() == 100
    }
}

impl Default for BudgetRule {
    fn default() -> Self {
        Self::new(50, 30, 20)
    }
}

/// Everything the allocation calculator needs besides records and categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetProfile {
    pub income: f64,
    #[serde(default)]
    pub rule: BudgetRule,
    #[serde(default)]
    pub use_limit_mode: bool,
    #[serde(default)]
    pub category_limits: HashMap<Uuid, f64>,
}

impl BudgetProfile {
    pub fn new(income: f64, rule: BudgetRule) -> Self {
        Self {
            income,
            rule,
            use_limit_mode: false,
            category_limits: HashMap::new(),
        }
    }

    pub fn with_limit_mode(mut self, enabled: bool) -> Self {
        self.use_limit_mode = enabled;
        self
    }

    pub fn limit_for(&self, category_id: Uuid) -> Option<f64> {
        self.category_limits.get(&category_id).copied()
    }
}

impl Default for BudgetProfile {
    fn default() -> Self {
        Self::new(0.0, BudgetRule::default())
    }
}
