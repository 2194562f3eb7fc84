//! Period normalization
//!
//! Turns raw source rows into a strictly monthly [`MonthlySeries`]:
//! - `Day`: last observation of each month; the in-progress month and stale
//!   trailing months are dropped
//! - `Month`: one row per month already, only re-keyed
//! - `Decade`: only samples labelled with marker `3` are kept

use crate::clock::Clock;
use crate::data::frequency::Granularity;
use crate::data::series::{MonthlySeries, Observation, PriceRow};
use crate::error::{Result, YapoError};
use crate::period::Period;
use crate::types::{Price, Timestamp};
use chrono::Months;
use std::collections::BTreeMap;

/// Marker digit of the decade sample that closes a month
const DECADE_CLOSING_MARKER: char = '3';

/// Converts raw rows into a monthly series relative to a reference instant
#[derive(Debug, Clone, Copy)]
pub struct PeriodNormalizer {
    now: Timestamp,
}

impl PeriodNormalizer {
    /// Create a normalizer with an explicit "now"
    pub fn new(now: Timestamp) -> Self {
        Self { now }
    }

    /// Create a normalizer reading "now" from a clock
    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::new(clock.now())
    }

    /// Normalize `rows` sampled at `granularity`
    pub fn normalize(&self, rows: Vec<PriceRow>, granularity: Granularity) -> Result<MonthlySeries> {
        match granularity {
            Granularity::Day => self.normalize_daily(rows),
            Granularity::Month => Self::normalize_monthly(rows),
            Granularity::Decade => Self::normalize_decade(rows),
        }
    }

    fn normalize_daily(&self, rows: Vec<PriceRow>) -> Result<MonthlySeries> {
        let mut stamped: Vec<(Timestamp, Period, Price)> = Vec::with_capacity(rows.len());
        for row in rows {
            match row.observed {
                Observation::At(ts) => stamped.push((ts, Period::from_timestamp(ts), row.close)),
                Observation::Label(label) => {
                    return Err(YapoError::MissingData(format!(
                        "daily row has no timestamp: {}",
                        label
                    )))
                }
            }
        }

        let (latest, latest_period) = match stamped.iter().max_by_key(|(ts, _, _)| *ts) {
            Some((ts, period, _)) => (*ts, *period),
            None => return Ok(MonthlySeries::new()),
        };

        let stale_before = self.now.checked_sub_months(Months::new(1)).unwrap_or(self.now);
        if latest < stale_before {
            log::debug!(
                "Latest daily row {} is stale, dropping period {}",
                latest,
                latest_period
            );
            stamped.retain(|(_, period, _)| *period < latest_period);
        }

        let current = Period::from_timestamp(self.now);
        let mut last_of_month: BTreeMap<Period, (Timestamp, Price)> = BTreeMap::new();
        for (ts, period, close) in stamped {
            if period == current {
                continue;
            }
            let entry = last_of_month.entry(period).or_insert((ts, close));
            if ts >= entry.0 {
                *entry = (ts, close);
            }
        }

        MonthlySeries::from_rows(
            last_of_month
                .into_iter()
                .map(|(period, (_, close))| (period, close))
                .collect(),
        )
    }

    fn normalize_monthly(rows: Vec<PriceRow>) -> Result<MonthlySeries> {
        let rows = rows
            .into_iter()
            .map(|row| {
                let period = match &row.observed {
                    Observation::At(ts) => Period::from_timestamp(*ts),
                    Observation::Label(label) => label.parse::<Period>()?,
                };
                Ok((period, row.close))
            })
            .collect::<Result<Vec<_>>>()?;
        MonthlySeries::from_rows(rows)
    }

    fn normalize_decade(rows: Vec<PriceRow>) -> Result<MonthlySeries> {
        let mut closing = Vec::new();
        for row in rows {
            let label = match &row.observed {
                Observation::Label(label) => label,
                Observation::At(ts) => {
                    return Err(YapoError::MissingData(format!(
                        "decade row has no label: {}",
                        ts
                    )))
                }
            };
            if !label.ends_with(DECADE_CLOSING_MARKER) {
                continue;
            }
            let period = label
                .get(..label.len().saturating_sub(2))
                .ok_or_else(|| YapoError::ParseError(format!("Invalid decade label: {}", label)))?
                .parse::<Period>()?;
            closing.push((period, row.close));
        }
        MonthlySeries::from_rows(closing)
    }
}
