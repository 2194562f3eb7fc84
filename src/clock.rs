//! Reference clock
//!
//! Every "is this month final yet" decision goes through a [`Clock`] so the
//! statistics engine stays deterministic under test.

use crate::period::Period;
use crate::types::Timestamp;
use chrono::{Datelike, Duration, TimeZone, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Timestamp;

    /// Last period that data is requested for.
    ///
    /// On the last day of a month the reference moves one month back.
    fn reference_period(&self) -> Period {
        let now = self.now();
        let current = Period::from_timestamp(now);
        if (now + Duration::days(1)).month() != now.month() {
            current - 1
        } else {
            current
        }
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: Timestamp,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self { now }
    }

    /// Midnight UTC of the given date, `None` for an invalid date
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}
