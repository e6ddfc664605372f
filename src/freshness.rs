use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fmt;

/// How close a pantry entry is to its expiration date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Freshness {
    Fresh,
    NearlyExpired,
    Expired,
}

impl Freshness {
    /// Classify an expiration date relative to `today`.
    ///
    /// Only calendar days are compared: an entry expiring today is
    /// `NearlyExpired`, one that expired any earlier day is `Expired`.
    pub fn classify(expires_on: NaiveDate, today: NaiveDate) -> Self {
        if expires_on < today {
            Freshness::Expired
        } else if expires_on == today {
            Freshness::NearlyExpired
        } else {
            Freshness::Fresh
        }
    }

    /// Expired and nearly expired entries both count as "expiring" when
    /// ranking recipes.
    pub fn is_expiring(self) -> bool {
        !matches!(self, Freshness::Fresh)
    }

    pub fn label(self) -> &'static str {
        match self {
            Freshness::Fresh => "Fresh",
            Freshness::NearlyExpired => "Nearly Expired",
            Freshness::Expired => "Expired",
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source of "today" for freshness decisions
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Uses the local calendar date of the machine
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
