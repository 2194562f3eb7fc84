//! Core types and constants

use chrono::{DateTime, Utc};

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// Price type (using f64 for precision)
pub type Price = f64;

/// Fractional rate (0.1 == 10%)
pub type Rate = f64;

/// Portfolio weight of a single asset
pub type Weight = f64;

/// Months in a calendar year
pub const MONTHS_IN_YEAR: i64 = 12;
