//! Source sampling granularity

use crate::error::{Result, YapoError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Native sampling frequency of a raw price source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One observation per trading day
    Day,
    /// One observation per month
    Month,
    /// Labelled `YYYY-MM-N` samples; the sample with marker `3` closes the month
    Decade,
}

impl Granularity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Decade => "decade",
        }
    }
}

impl FromStr for Granularity {
    type Err = YapoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" | "d" => Ok(Granularity::Day),
            "month" | "monthly" | "m" => Ok(Granularity::Month),
            "decade" => Ok(Granularity::Decade),
            _ => Err(YapoError::UnsupportedGranularity(s.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
