//! Calendar month periods
//!
//! A [`Period`] is the uniform time axis of every derived statistic. Periods
//! are totally ordered and support month arithmetic:
//!
//! ```rust
//! use rusty_yapo::period::Period;
//!
//! let p: Period = "2017-2".parse().unwrap();
//! assert_eq!((p - 12).to_string(), "2016-02");
//! assert_eq!(p - Period::new(2011, 1).unwrap(), 73);
//! ```

use crate::error::{Result, YapoError};
use crate::types::{Timestamp, MONTHS_IN_YEAR};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Calendar month (year + month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Earliest representable period
    pub const MIN: Period = Period { year: i32::MIN, month: 1 };
    /// Latest representable period
    pub const MAX: Period = Period { year: i32::MAX, month: 12 };

    /// Create a period, `month` is 1-based
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(YapoError::ParseError(format!(
                "month must be within 1..=12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// Period containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Period containing the given timestamp
    pub fn from_timestamp(ts: Timestamp) -> Self {
        Self::from_date(ts.date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Months elapsed since year 0
    fn ordinal(&self) -> i64 {
        self.year as i64 * MONTHS_IN_YEAR + (self.month as i64 - 1)
    }

    /// `None` when the year does not fit in `i32`
    fn from_ordinal(ordinal: i64) -> Option<Self> {
        let year = i32::try_from(ordinal.div_euclid(MONTHS_IN_YEAR)).ok()?;
        Some(Self {
            year,
            month: ordinal.rem_euclid(MONTHS_IN_YEAR) as u32 + 1,
        })
    }

    /// Period `months` later, `None` outside the representable range
    pub fn checked_add(self, months: i64) -> Option<Period> {
        Period::from_ordinal(self.ordinal().checked_add(months)?)
    }

    /// Period `months` earlier, `None` outside the representable range
    pub fn checked_sub(self, months: i64) -> Option<Period> {
        Period::from_ordinal(self.ordinal().checked_sub(months)?)
    }

    fn saturating_add(self, months: i64) -> Period {
        self.checked_add(months)
            .unwrap_or(if months < 0 { Period::MIN } else { Period::MAX })
    }

    /// Next calendar month
    pub fn succ(&self) -> Self {
        *self + 1
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl Add<i64> for Period {
    type Output = Period;

    /// Saturates at [`Period::MIN`] / [`Period::MAX`]
    fn add(self, months: i64) -> Period {
        self.saturating_add(months)
    }
}

impl Sub<i64> for Period {
    type Output = Period;

    /// Saturates at [`Period::MIN`] / [`Period::MAX`]
    fn sub(self, months: i64) -> Period {
        match months.checked_neg() {
            Some(back) => self.saturating_add(back),
            None => Period::MAX,
        }
    }
}

/// Signed number of months between two periods
impl Sub<Period> for Period {
    type Output = i64;

    fn sub(self, other: Period) -> i64 {
        self.ordinal() - other.ordinal()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = YapoError;

    /// Accepts `YYYY-M` and `YYYY-MM`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| YapoError::ParseError(format!("Invalid period: {}", s)))?;
        let year: i32 = year
            .parse()
            .map_err(|e| YapoError::ParseError(format!("Invalid period year '{}': {}", s, e)))?;
        let month: u32 = month
            .parse()
            .map_err(|e| YapoError::ParseError(format!("Invalid period month '{}': {}", s, e)))?;
        Period::new(year, month)
    }
}

impl TryFrom<String> for Period {
    type Error = YapoError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> String {
        period.to_string()
    }
}
