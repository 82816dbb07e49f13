//! Dashboard aggregation: one call that gathers everything a month view shows.

use serde::Serialize;
use tribudget_domain::{
    AllocationReport, Bucket, BucketStatus, BucketSummary, BudgetBook, GoalProgress, YearMonth,
};

use crate::{AllocationService, Clock, CurrencyFormatter, GoalService, PeriodService};

/// Pre-formatted amounts for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketLine {
    pub bucket: Bucket,
    pub target: String,
    pub spent: String,
    pub remaining: String,
    pub percent_used: f64,
    pub status: BucketStatus,
}

impl BucketLine {
    fn from_summary(summary: &BucketSummary, formatter: &dyn CurrencyFormatter, currency: &str) -> Self {
        Self {
            bucket: summary.bucket,
            target: formatter.format_amount(summary.target, currency),
            spent: formatter.format_amount(summary.spent, currency),
            remaining: formatter.format_amount(summary.remaining, currency),
            percent_used: summary.percent_used,
            status: summary.status(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub period: YearMonth,
    /// Months the user can switch to, most recent first.
    pub available_periods: Vec<YearMonth>,
    pub allocation: AllocationReport,
    pub goals: Vec<GoalProgress>,
    pub lines: Vec<BucketLine>,
    pub total_spent: String,
    pub total_remaining: String,
    pub onboarded: bool,
    pub has_sample_data: bool,
}

impl Dashboard {
    pub fn line(&self, bucket: Bucket) -> Option<&BucketLine> {
        self.lines.iter().find(|line| line.bucket == bucket)
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Builds the dashboard for `period`, or for the clock's current month when `None`.
    pub fn dashboard(
        book: &BudgetBook,
        period: Option<YearMonth>,
        clock: &dyn Clock,
        formatter: &dyn CurrencyFormatter,
        currency: &str,
    ) -> Dashboard {
        let today = clock.today();
        let period = period.unwrap_or_else(|| clock.current_period());
        let allocation = AllocationService::allocate_period(
            &book.profile,
            &book.categories,
            &book.expenses,
            Some(period),
        );
        let lines = allocation
            .buckets
            .iter()
            .map(|summary| BucketLine::from_summary(summary, formatter, currency))
            .collect();
        Dashboard {
            period,
            available_periods: PeriodService::available_periods(&book.expenses, today),
            goals: GoalService::progress_for_book(book, period, today),
            lines,
            total_spent: formatter.format_amount(allocation.total_spent, currency),
            total_remaining: formatter.format_amount(allocation.total_remaining(), currency),
            allocation,
            onboarded: book.onboarding.is_onboarded(),
            has_sample_data: book.has_sample_data(),
        }
    }
}
