//! Savings goal planning and pacing.

use chrono::NaiveDate;
use tracing::debug;
use tribudget_domain::{
    sanitize_amount, Bucket, BudgetBook, Category, ContributionPlan, ContributionStatus, Expense,
    GoalProgress, SavingsGoal, YearMonth,
};

/// Horizon used when a goal has no usable target date.
pub const DEFAULT_GOAL_HORIZON_MONTHS: u32 = 12;

const AHEAD_FACTOR: f64 = 1.1;
const BEHIND_FACTOR: f64 = 0.9;

pub struct GoalService;

impl GoalService {
    /// Parses an `MM/YYYY` target date.
    pub fn parse_target_date(raw: &str) -> Option<YearMonth> {
        let (month, year) = raw.trim().split_once('/')?;
        let month: u32 = month.trim().parse().ok()?;
        let year: i32 = year.trim().parse().ok()?;
        YearMonth::new(year, month)
    }

    /// Monthly contribution needed to go from `current` to `target` by `target_date`.
    ///
    /// Never fails: a missing or unparseable date falls back to a twelve-month horizon, and a
    /// date in the current month or earlier makes the whole remainder due now.
    pub fn plan_monthly_contribution(
        target: f64,
        current: f64,
        target_date: Option<&str>,
        today: NaiveDate,
    ) -> ContributionPlan {
        let target = sanitize_amount(target);
        let current = sanitize_amount(current);
        if current >= target {
            return ContributionPlan::met();
        }
        let outstanding = target - current;
        let default_plan = ContributionPlan {
            monthly_amount: outstanding / DEFAULT_GOAL_HORIZON_MONTHS as f64,
            months_remaining: DEFAULT_GOAL_HORIZON_MONTHS,
            goal_met: false,
        };
        let Some(raw) = target_date else {
            return default_plan;
        };
        let Some(deadline) = Self::parse_target_date(raw) else {
            debug!(target_date = raw, "unparseable goal date; using default horizon");
            return default_plan;
        };
        let months = YearMonth::of(today).months_until(deadline);
        if months <= 0 {
            return ContributionPlan {
                monthly_amount: outstanding,
                months_remaining: 0,
                goal_met: false,
            };
        }
        ContributionPlan {
            monthly_amount: outstanding / months as f64,
            months_remaining: u32::try_from(months).unwrap_or(u32::MAX),
            goal_met: false,
        }
    }

    /// Compares an actual contribution with the recommended one.
    pub fn contribution_status(recommended: f64, actual: f64) -> ContributionStatus {
        if actual >= recommended * AHEAD_FACTOR {
            ContributionStatus::Ahead
        } else if actual < recommended * BEHIND_FACTOR {
            ContributionStatus::Behind
        } else {
            ContributionStatus::OnTrack
        }
    }

    /// Total saved into `category` across `records`.
    pub fn saved_in_category<'a, I>(category: &Category, records: I) -> f64
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        records
            .into_iter()
            .filter(|record| record.resolved_bucket() == Some(Bucket::Savings))
            .filter(|record| category.matches_name(&record.subcategory))
            .map(Expense::effective_amount)
            .sum()
    }

    /// Progress of `category` towards `goal`, using the full record history for the saved
    /// amount and `period` for this month's contribution.
    pub fn goal_progress(
        category: &Category,
        goal: &SavingsGoal,
        records: &[Expense],
        period: YearMonth,
        today: NaiveDate,
    ) -> GoalProgress {
        let target = sanitize_amount(goal.amount);
        let saved = Self::saved_in_category(category, records);
        let contributed_this_period = Self::saved_in_category(
            category,
            records
                .iter()
                .filter(|record| record.parsed_date().is_some_and(|d| period.contains(d))),
        );
        let plan =
            Self::plan_monthly_contribution(target, saved, goal.target_date.as_deref(), today);
        let progress_percent = if target > 0.0 {
            (saved / target * 100.0).min(100.0)
        } else {
            0.0
        };
        GoalProgress {
            category_id: category.id,
            category_name: category.name.clone(),
            target,
            saved,
            contributed_this_period,
            progress_percent,
            plan,
            status: Self::contribution_status(plan.monthly_amount, contributed_this_period),
        }
    }

    /// Progress for every savings category that has a goal, in registry order.
    pub fn progress_for_book(
        book: &BudgetBook,
        period: YearMonth,
        today: NaiveDate,
    ) -> Vec<GoalProgress> {
        book.categories_in(Bucket::Savings)
            .filter_map(|category| {
                book.goals
                    .get(&category.id)
                    .map(|goal| Self::goal_progress(category, goal, &book.expenses, period, today))
            })
            .collect()
    }
}
