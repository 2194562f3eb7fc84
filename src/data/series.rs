//! Raw observations and monthly series

use crate::error::{Result, YapoError};
use crate::period::Period;
use crate::types::{Price, Timestamp};
use serde::{Deserialize, Serialize};

/// Where a raw observation sits in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Observation {
    /// Exact instant (daily and monthly sources)
    At(Timestamp),
    /// Source-specific period label (`YYYY-MM` or decade labels `YYYY-MM-N`)
    Label(String),
}

/// Raw observation as delivered by a price source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub observed: Observation,
    pub close: Price,
}

impl PriceRow {
    pub fn at(timestamp: Timestamp, close: Price) -> Self {
        Self {
            observed: Observation::At(timestamp),
            close,
        }
    }

    pub fn labeled(label: impl Into<String>, close: Price) -> Self {
        Self {
            observed: Observation::Label(label.into()),
            close,
        }
    }

    /// Best-effort month of this row, used for range filtering by sources
    pub fn approximate_period(&self) -> Option<Period> {
        match &self.observed {
            Observation::At(ts) => Some(Period::from_timestamp(*ts)),
            Observation::Label(label) => {
                let mut parts = label.splitn(3, '-');
                let year = parts.next()?;
                let month = parts.next()?;
                format!("{}-{}", year, month).parse().ok()
            }
        }
    }
}

/// Period-indexed series with exactly one value per period, ascending.
///
/// Holds prices, exchange-rate multipliers or monthly inflation rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    periods: Vec<Period>,
    values: Vec<f64>,
}

impl MonthlySeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from unordered rows; duplicate periods are rejected
    pub fn from_rows(mut rows: Vec<(Period, f64)>) -> Result<Self> {
        rows.sort_by_key(|(period, _)| *period);
        if let Some(pair) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(YapoError::InvalidArgument(format!(
                "duplicate period {} in monthly series",
                pair[0].0
            )));
        }
        let (periods, values) = rows.into_iter().unzip();
        Ok(Self { periods, values })
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, f64)> + '_ {
        self.periods.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at `period`, if present
    pub fn get(&self, period: Period) -> Option<f64> {
        self.periods
            .binary_search(&period)
            .ok()
            .map(|idx| self.values[idx])
    }

    pub fn first_period(&self) -> Option<Period> {
        self.periods.first().copied()
    }

    pub fn last_period(&self) -> Option<Period> {
        self.periods.last().copied()
    }

    /// Rows within `[start, end]` inclusive
    pub fn window(&self, start: Period, end: Period) -> Self {
        let lo = self.periods.partition_point(|p| *p < start);
        let hi = self.periods.partition_point(|p| *p <= end).max(lo);
        Self {
            periods: self.periods[lo..hi].to_vec(),
            values: self.values[lo..hi].to_vec(),
        }
    }

    /// Apply `f` to every value, keeping the period axis
    pub fn map_values<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            periods: self.periods.clone(),
            values: self.values.iter().map(|v| f(*v)).collect(),
        }
    }

    /// Split into period and value columns
    pub fn into_columns(self) -> (Vec<Period>, Vec<f64>) {
        (self.periods, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Period {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_rows_sorts() {
        let series = MonthlySeries::from_rows(vec![
            (p("2020-3"), 3.0),
            (p("2020-1"), 1.0),
            (p("2020-2"), 2.0),
        ])
        .unwrap();

        assert_eq!(series.periods(), &[p("2020-1"), p("2020-2"), p("2020-3")]);
        assert_eq!(series.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(series.get(p("2020-2")), Some(2.0));
        assert_eq!(series.get(p("2020-4")), None);
    }

    #[test]
    fn test_from_rows_rejects_duplicates() {
        let result = MonthlySeries::from_rows(vec![(p("2020-1"), 1.0), (p("2020-1"), 2.0)]);
        assert!(matches!(result, Err(YapoError::InvalidArgument(_))));
    }

    #[test]
    fn test_window() {
        let series = MonthlySeries::from_rows(
            (1..=12).map(|m| (Period::new(2020, m).unwrap(), m as f64)).collect(),
        )
        .unwrap();

        let w = series.window(p("2020-3"), p("2020-5"));
        assert_eq!(w.values(), &[3.0, 4.0, 5.0]);

        assert!(series.window(p("2020-6"), p("2020-5")).is_empty());
        assert!(series.window(p("2021-1"), p("2021-5")).is_empty());
        assert_eq!(series.window(p("2019-1"), p("2030-1")), series);
    }

    #[test]
    fn test_approximate_period() {
        assert_eq!(
            PriceRow::labeled("1995-04-3", 1.0).approximate_period(),
            Some(p("1995-4"))
        );
        assert_eq!(
            PriceRow::labeled("2001-11", 1.0).approximate_period(),
            Some(p("2001-11"))
        );
        assert_eq!(PriceRow::labeled("garbage", 1.0).approximate_period(), None);
    }
}
