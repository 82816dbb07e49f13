//! Calendar-month filtering and grouping of expense records.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;
use tribudget_domain::{Expense, PeriodTotal, YearMonth};

/// Stateless helpers that resolve records into year-month periods.
pub struct PeriodService;

impl PeriodService {
    /// Returns the records dated within `key`.
    ///
    /// Records whose date does not parse are skipped. When `key` is absent or malformed every
    /// record is returned: callers without a selected month see the full history.
    pub fn filter_by_key<'a>(records: &'a [Expense], key: Option<&str>) -> Vec<&'a Expense> {
        let Some(raw) = key else {
            return records.iter().collect();
        };
        match raw.parse::<YearMonth>() {
            Ok(period) => Self::filter_by_period(records, period),
            Err(err) => {
                debug!(%err, "period key rejected; returning all records");
                records.iter().collect()
            }
        }
    }

    /// Returns the records dated within `period`, skipping unparseable dates.
    pub fn filter_by_period(records: &[Expense], period: YearMonth) -> Vec<&Expense> {
        records
            .iter()
            .filter(|record| match record.parsed_date() {
                Some(date) => period.contains(date),
                None => {
                    debug!(id = %record.id, date = %record.date, "skipping record with unparseable date");
                    false
                }
            })
            .collect()
    }

    /// Distinct periods present in `records` plus the month containing `today`, most recent first.
    pub fn available_periods(records: &[Expense], today: NaiveDate) -> Vec<YearMonth> {
        let mut periods: BTreeSet<YearMonth> =
            records.iter().filter_map(Expense::period).collect();
        periods.insert(YearMonth::of(today));
        periods.into_iter().rev().collect()
    }

    /// Same as [`PeriodService::available_periods`], rendered as `"<year>-<month>"` keys.
    pub fn available_keys(records: &[Expense], today: NaiveDate) -> Vec<String> {
        Self::available_periods(records, today)
            .into_iter()
            .map(|period| period.key())
            .collect()
    }

    /// Spending per month, most recent first. Records with unparseable dates are ignored.
    pub fn monthly_totals(records: &[Expense]) -> Vec<PeriodTotal> {
        let mut totals: BTreeMap<YearMonth, (f64, usize)> = BTreeMap::new();
        for record in records {
            let Some(period) = record.period() else {
                continue;
            };
            let entry = totals.entry(period).or_insert((0.0, 0));
            entry.0 += record.effective_amount();
            entry.1 += 1;
        }
        totals
            .into_iter()
            .rev()
            .map(|(period, (spent, records))| PeriodTotal {
                period,
                spent,
                records,
            })
            .collect()
    }
}
