//! Savings goals and contribution planning results.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Target attached to a single savings category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub amount: f64,
    /// Month/year target in `MM/YYYY` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SavingsGoal {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            target_date: None,
            note: None,
        }
    }

    pub fn with_target_date(mut self, target_date: impl Into<String>) -> Self {
        self.target_date = Some(target_date.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Recommended monthly contribution towards a goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ContributionPlan {
    pub monthly_amount: f64,
    pub months_remaining: u32,
    pub goal_met: bool,
}

impl ContributionPlan {
    pub fn met() -> Self {
        Self {
            monthly_amount: 0.0,
            months_remaining: 0,
            goal_met: true,
        }
    }
}

/// Pacing of actual contributions against the recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionStatus {
    Ahead,
    OnTrack,
    Behind,
}

impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContributionStatus::Ahead => "ahead",
            ContributionStatus::OnTrack => "on-track",
            ContributionStatus::Behind => "behind",
        };
        f.write_str(label)
    }
}

/// Progress of one savings category towards its goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalProgress {
    pub category_id: Uuid,
    pub category_name: String,
    pub target: f64,
    /// Everything ever saved into the category.
    pub saved: f64,
    /// Saved within the selected period.
    pub contributed_this_period: f64,
    /// `saved / target` as a percentage, clamped to 0..=100.
    pub progress_percent: f64,
    pub plan: ContributionPlan,
    pub status: ContributionStatus,
}
