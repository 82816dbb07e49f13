//! The three-way bucket classification and amount/name normalisation helpers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Top-level allocation bucket of the Needs/Savings/Wants rule.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Needs,
    Savings,
    Wants,
}

impl Bucket {
    /// All buckets in display order.
    pub const ALL: [Bucket; 3] = [Bucket::Needs, Bucket::Savings, Bucket::Wants];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Needs => "Needs",
            Bucket::Savings => "Savings",
            Bucket::Wants => "Wants",
        }
    }

    /// Resolves a stored label, ignoring surrounding whitespace and case.
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "needs" => Some(Bucket::Needs),
            "savings" => Some(Bucket::Savings),
            "wants" => Some(Bucket::Wants),
            _ => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBucket(pub String);

impl fmt::Display for UnknownBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown bucket `{}`", self.0)
    }
}

impl std::error::Error for UnknownBucket {}

impl FromStr for Bucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bucket::parse_label(s).ok_or_else(|| UnknownBucket(s.to_string()))
    }
}

/// Normalizes a category name or subcategory label for matching.
pub fn name_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Replaces NaN, infinite and negative amounts with zero.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
