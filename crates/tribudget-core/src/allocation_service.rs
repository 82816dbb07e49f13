//! Provides the Needs/Savings/Wants allocation calculator.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;
use tribudget_domain::{
    name_key, sanitize_amount, AllocationReport, Bucket, BucketSummary, BudgetProfile, Category,
    CategoryBreakdown, Expense, YearMonth,
};

use crate::period_service::PeriodService;

/// Stateless allocation utilities. Inputs are only read, never mutated.
pub struct AllocationService;

impl AllocationService {
    /// Target for `bucket`: the sum of category limits in limit mode, otherwise
    /// `income * percentage / 100`.
    pub fn bucket_target(profile: &BudgetProfile, categories: &[Category], bucket: Bucket) -> f64 {
        if profile.use_limit_mode {
            categories
                .iter()
                .filter(|category| category.bucket == bucket)
                .filter_map(|category| profile.limit_for(category.id))
                .map(sanitize_amount)
                .sum()
        } else {
            sanitize_amount(profile.income) * profile.rule.percentage(bucket) as f64 / 100.0
        }
    }

    /// Filters `records` to `period` (all records when `None`) and allocates them.
    pub fn allocate_period(
        profile: &BudgetProfile,
        categories: &[Category],
        records: &[Expense],
        period: Option<YearMonth>,
    ) -> AllocationReport {
        let mut report = match period {
            Some(period) => Self::allocate(
                profile,
                categories,
                PeriodService::filter_by_period(records, period),
            ),
            None => Self::allocate(profile, categories, records),
        };
        report.period = period;
        report
    }

    /// Computes bucket and per-category totals for an already-filtered record set.
    ///
    /// A record counts towards a category when it sits in the category's bucket and its
    /// subcategory matches the category name case-insensitively. Records whose bucket label
    /// does not resolve are left out of every sum.
    pub fn allocate<'a, I>(
        profile: &BudgetProfile,
        categories: &[Category],
        records: I,
    ) -> AllocationReport
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut bucket_spent: HashMap<Bucket, f64> = HashMap::new();
        // Ordered so the unassigned sum adds in the same order on every call.
        let mut label_spent: BTreeMap<(Bucket, String), f64> = BTreeMap::new();
        let mut excluded = 0usize;

        for record in records {
            let Some(bucket) = record.resolved_bucket() else {
                excluded += 1;
                continue;
            };
            let amount = record.effective_amount();
            *bucket_spent.entry(bucket).or_insert(0.0) += amount;
            *label_spent
                .entry((bucket, name_key(&record.subcategory)))
                .or_insert(0.0) += amount;
        }
        if excluded > 0 {
            debug!(excluded, "records with unknown buckets left out of allocation");
        }

        let buckets: Vec<BucketSummary> = Bucket::ALL
            .iter()
            .map(|&bucket| {
                Self::summarize_bucket(profile, categories, bucket, &bucket_spent, &label_spent)
            })
            .collect();

        let total_target = buckets.iter().map(|summary| summary.target).sum();
        let total_spent = buckets.iter().map(|summary| summary.spent).sum();
        AllocationReport {
            period: None,
            buckets,
            total_target,
            total_spent,
            rule_total_mismatch: !profile.use_limit_mode && !profile.rule.is_balanced(),
            limit_mode: profile.use_limit_mode,
        }
    }

    fn summarize_bucket(
        profile: &BudgetProfile,
        categories: &[Category],
        bucket: Bucket,
        bucket_spent: &HashMap<Bucket, f64>,
        label_spent: &BTreeMap<(Bucket, String), f64>,
    ) -> BucketSummary {
        let mut matched_labels = HashSet::new();
        let rows: Vec<CategoryBreakdown> = categories
            .iter()
            .filter(|category| category.bucket == bucket)
            .map(|category| {
                let key = (bucket, name_key(&category.name));
                let spent = label_spent.get(&key).copied().unwrap_or(0.0);
                matched_labels.insert(key);
                let limit = if profile.use_limit_mode {
                    profile.limit_for(category.id).map(sanitize_amount)
                } else {
                    None
                };
                CategoryBreakdown {
                    category_id: category.id,
                    name: category.name.clone(),
                    icon: category.icon.clone(),
                    spent,
                    limit,
                    is_over_limit: limit.map_or(false, |limit| spent > limit),
                }
            })
            .collect();

        let unassigned_spent = label_spent
            .iter()
            .filter(|(key, _)| key.0 == bucket && !matched_labels.contains(*key))
            .map(|(_, amount)| *amount)
            .sum();

        BucketSummary::from_parts(
            bucket,
            Self::bucket_target(profile, categories, bucket),
            bucket_spent.get(&bucket).copied().unwrap_or(0.0),
            rows,
            unassigned_spent,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tribudget_domain::BudgetRule;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn categories() -> Vec<Category> {
        vec![
            Category::new("Rent", Bucket::Needs),
            Category::new("Groceries", Bucket::Needs),
            Category::new("Emergency Fund", Bucket::Savings),
            Category::new("Dining Out", Bucket::Wants),
        ]
    }

    #[test]
    fn reference_scenario_allocates_each_bucket() {
        let profile = BudgetProfile::new(4000.0, BudgetRule::new(50, 30, 20));
        let records = vec![
            Expense::new("Rent", 1200.0, Bucket::Needs, "Rent", jan(1)),
            Expense::new("Dinner", 200.0, Bucket::Wants, "Dining Out", jan(5)),
        ];
        let report = AllocationService::allocate(&profile, &categories(), &records);

        let needs = report.bucket(Bucket::Needs).unwrap();
        assert_eq!((needs.target, needs.spent, needs.remaining), (2000.0, 1200.0, 800.0));
        assert_eq!(needs.percent_used, 60.0);

        let savings = report.bucket(Bucket::Savings).unwrap();
        assert_eq!((savings.target, savings.spent, savings.remaining), (1200.0, 0.0, 1200.0));
        assert_eq!(savings.percent_used, 0.0);

        let wants = report.bucket(Bucket::Wants).unwrap();
        assert_eq!((wants.target, wants.spent, wants.remaining), (800.0, 200.0, 600.0));
        assert_eq!(wants.percent_used, 25.0);
        assert!(!report.rule_total_mismatch);
    }

    #[test]
    fn every_configured_category_gets_a_row() {
        let profile = BudgetProfile::new(1000.0, BudgetRule::default());
        let records = vec![Expense::new("Shop", 80.0, Bucket::Needs, "groceries", jan(3))];
        let report = AllocationService::allocate(&profile, &categories(), &records);
        let needs = report.bucket(Bucket::Needs).unwrap();
        assert_eq!(needs.categories.len(), 2);
        let rent = needs.categories.iter().find(|row| row.name == "Rent").unwrap();
        assert_eq!(rent.spent, 0.0);
        let groceries = needs.categories.iter().find(|row| row.name == "Groceries").unwrap();
        assert_eq!(groceries.spent, 80.0);
    }

    #[test]
    fn unknown_buckets_are_excluded() {
        let profile = BudgetProfile::new(1000.0, BudgetRule::default());
        let mut stray = Expense::new("Yacht", 5000.0, Bucket::Wants, "Boats", jan(2));
        stray.bucket = "Luxuries".into();
        let records = vec![stray, Expense::new("Bus", 3.0, Bucket::Needs, "Transport", jan(2))];
        let report = AllocationService::allocate(&profile, &categories(), &records);
        assert_eq!(report.total_spent, 3.0);
        assert_eq!(report.bucket(Bucket::Needs).unwrap().unassigned_spent, 3.0);
    }

    #[test]
    fn zero_income_never_divides() {
        let profile = BudgetProfile::new(0.0, BudgetRule::default());
        let records = vec![Expense::new("Rent", 700.0, Bucket::Needs, "Rent", jan(1))];
        let report = AllocationService::allocate(&profile, &categories(), &records);
        let needs = report.bucket(Bucket::Needs).unwrap();
        assert_eq!(needs.target, 0.0);
        assert_eq!(needs.remaining, -700.0);
        assert_eq!(needs.percent_used, 0.0);
        assert_eq!(needs.raw_ratio(), 0.0);
    }

    #[test]
    fn unbalanced_rule_is_flagged_but_computed_independently() {
        let profile = BudgetProfile::new(1000.0, BudgetRule::new(60, 30, 20));
        let report = AllocationService::allocate(&profile, &categories(), &Vec::<Expense>::new());
        assert!(report.rule_total_mismatch);
        assert_eq!(report.bucket(Bucket::Needs).unwrap().target, 600.0);
        assert_eq!(report.total_target, 1100.0);
    }

    #[test]
    fn limit_mode_sums_category_limits() {
        let categories = categories();
        let mut profile = BudgetProfile::new(4000.0, BudgetRule::default()).with_limit_mode(true);
        profile.category_limits.insert(categories[0].id, 900.0);
        profile.category_limits.insert(categories[1].id, 300.0);
        let records = vec![
            Expense::new("Rent", 900.0, Bucket::Needs, "Rent", jan(1)),
            Expense::new("Shop", 320.0, Bucket::Needs, "Groceries", jan(8)),
        ];
        let report = AllocationService::allocate(&profile, &categories, &records);
        let needs = report.bucket(Bucket::Needs).unwrap();
        assert_eq!(needs.target, 1200.0);
        assert_eq!(needs.remaining, -20.0);

        let groceries = needs.categories.iter().find(|row| row.name == "Groceries").unwrap();
        assert_eq!(groceries.limit, Some(300.0));
        assert!(groceries.is_over_limit);
        let rent = needs.categories.iter().find(|row| row.name == "Rent").unwrap();
        assert!(!rent.is_over_limit);

        let savings = report.bucket(Bucket::Savings).unwrap();
        assert_eq!(savings.target, 0.0);
        assert!(savings.categories.iter().all(|row| row.limit.is_none()));
        assert!(!report.rule_total_mismatch);
        assert_eq!(report.over_limit_categories().len(), 1);
    }

    #[test]
    fn allocate_period_filters_before_summing() {
        let profile = BudgetProfile::new(1000.0, BudgetRule::default());
        let records = vec![
            Expense::new("Rent", 500.0, Bucket::Needs, "Rent", jan(1)),
            Expense::new(
                "Rent",
                500.0,
                Bucket::Needs,
                "Rent",
                NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            ),
        ];
        let period = YearMonth::new(2025, 2);
        let report = AllocationService::allocate_period(&profile, &categories(), &records, period);
        assert_eq!(report.period, period);
        assert_eq!(report.total_spent, 500.0);
    }
}
