//! Expiry bucketing
//!
//! Buckets are relative to an explicit reference date so results do not
//! depend on the clock of whoever evaluates them.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Last day offset (inclusive) still counted as "Expiring Soon"
pub const SOON_DAYS: u64 = 3;
/// Last day offset (inclusive) still counted as "Expiring This Week"
pub const WEEK_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpiryStatus {
    Expired,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    #[serde(rename = "Expiring This Week")]
    ExpiringThisWeek,
    Fresh,
}

impl ExpiryStatus {
    pub const ALL: &'static [ExpiryStatus] = &[
        ExpiryStatus::Expired,
        ExpiryStatus::ExpiringSoon,
        ExpiryStatus::ExpiringThisWeek,
        ExpiryStatus::Fresh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "Expired",
            ExpiryStatus::ExpiringSoon => "Expiring Soon",
            ExpiryStatus::ExpiringThisWeek => "Expiring This Week",
            ExpiryStatus::Fresh => "Fresh",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == label)
    }

    /// Classify one listing.
    ///
    /// A missing expiry date is `Fresh`: it never compares as expired or
    /// expiring, so it lands in the catch-all bucket.
    pub fn classify(expiry: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(date) = expiry else {
            return ExpiryStatus::Fresh;
        };
        let bounds = ExpiryBounds::new(today);
        if date < bounds.today {
            ExpiryStatus::Expired
        } else if date <= bounds.soon_end {
            ExpiryStatus::ExpiringSoon
        } else if date >= bounds.week_start && date <= bounds.week_end {
            ExpiryStatus::ExpiringThisWeek
        } else {
            ExpiryStatus::Fresh
        }
    }
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boundary dates for a reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryBounds {
    pub today: NaiveDate,
    /// today + 3
    pub soon_end: NaiveDate,
    /// today + 4
    pub week_start: NaiveDate,
    /// today + 7
    pub week_end: NaiveDate,
}

impl ExpiryBounds {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            soon_end: add_days(today, SOON_DAYS),
            week_start: add_days(today, SOON_DAYS + 1),
            week_end: add_days(today, WEEK_DAYS),
        }
    }
}

/// `date + days`, saturating at the calendar maximum
pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}
