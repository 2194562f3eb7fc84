//! In-memory currency rate registry
//!
//! Stores monthly rates per currency pair. Lookups fall back to the inverse
//! pair and, when enabled, to a cross rate through a base currency.

use super::base::CurrencyRateRegistry;
use crate::currency::{Currency, CurrencyPair};
use crate::data::series::MonthlySeries;
use crate::error::{Result, YapoError};
use crate::period::Period;
use hashbrown::HashMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;

/// CSV row: `period,from,to,rate`
#[derive(Debug, Deserialize)]
struct RateRecord {
    period: Period,
    from: Currency,
    to: Currency,
    rate: f64,
}

/// In-memory monthly rate storage
///
/// # Example
/// ```
/// use rusty_yapo::currency::Currency;
/// use rusty_yapo::data::fx::{CurrencyRateRegistry, InMemoryCurrencyRates};
/// use rusty_yapo::period::Period;
///
/// let jan = Period::new(2024, 1).unwrap();
/// let mut rates = InMemoryCurrencyRates::new();
/// rates.add_rate(Currency::EUR, Currency::USD, jan, 1.25).unwrap();
///
/// // Inverse lookup
/// let usd_eur = rates.rates(Currency::USD, Currency::EUR).unwrap();
/// assert_eq!(usd_eur.get(jan), Some(0.8));
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryCurrencyRates {
    /// (from, to) -> (period -> rate)
    rates: HashMap<(Currency, Currency), BTreeMap<Period, f64>>,
    auto_inverse: bool,
    auto_cross: bool,
    base_currency: Currency,
}

impl InMemoryCurrencyRates {
    /// Create an empty registry with inverse lookup enabled
    pub fn new() -> Self {
        Self::with_config(true, false, Currency::USD)
    }

    /// Create with configuration
    pub fn with_config(auto_inverse: bool, auto_cross: bool, base_currency: Currency) -> Self {
        Self {
            rates: HashMap::new(),
            auto_inverse,
            auto_cross,
            base_currency,
        }
    }

    /// Add a single monthly rate
    pub fn add_rate(&mut self, from: Currency, to: Currency, period: Period, rate: f64) -> Result<()> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(YapoError::InvalidArgument(format!(
                "currency rate must be positive, got {} for {} at {}",
                rate,
                CurrencyPair::new(from, to),
                period
            )));
        }
        self.rates
            .entry((from, to))
            .or_insert_with(BTreeMap::new)
            .insert(period, rate);
        Ok(())
    }

    /// Add every row of a rate series
    pub fn add_series(&mut self, from: Currency, to: Currency, series: &MonthlySeries) -> Result<()> {
        for (period, rate) in series.iter() {
            self.add_rate(from, to, period, rate)?;
        }
        Ok(())
    }

    /// Load rates from CSV with header `period,from,to,rate`
    pub fn load_from_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut count = 0;
        for record in reader.deserialize() {
            let record: RateRecord = record?;
            self.add_rate(record.from, record.to, record.period, record.rate)?;
            count += 1;
        }
        log::debug!("Loaded {} currency rates", count);
        Ok(count)
    }

    /// Number of stored pairs
    pub fn num_pairs(&self) -> usize {
        self.rates.len()
    }

    fn direct(&self, from: Currency, to: Currency) -> Option<MonthlySeries> {
        self.rates.get(&(from, to)).map(to_series)
    }

    fn direct_or_inverse(&self, from: Currency, to: Currency) -> Option<MonthlySeries> {
        self.direct(from, to).or_else(|| {
            if !self.auto_inverse {
                return None;
            }
            self.direct(to, from)
                .map(|series| series.map_values(|rate| 1.0 / rate))
        })
    }

    fn cross(&self, from: Currency, to: Currency) -> Option<MonthlySeries> {
        let base = self.base_currency;
        if !self.auto_cross || from == base || to == base {
            return None;
        }
        let from_base = self.direct_or_inverse(from, base)?;
        let base_to = self.direct_or_inverse(base, to)?;
        let joined = from_base
            .iter()
            .filter_map(|(period, r1)| base_to.get(period).map(|r2| (period, r1 * r2)))
            .collect::<Vec<_>>();
        MonthlySeries::from_rows(joined).ok()
    }
}

fn to_series(tree: &BTreeMap<Period, f64>) -> MonthlySeries {
    // BTreeMap keys are unique and ordered, so this cannot fail
    MonthlySeries::from_rows(tree.iter().map(|(p, r)| (*p, *r)).collect()).unwrap_or_default()
}

impl Default for InMemoryCurrencyRates {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrencyRateRegistry for InMemoryCurrencyRates {
    fn rates(&self, from: Currency, to: Currency) -> Result<MonthlySeries> {
        self.direct_or_inverse(from, to)
            .or_else(|| self.cross(from, to))
            .ok_or_else(|| YapoError::CurrencyPairUnavailable {
                from: from.to_string(),
                to: to.to_string(),
            })
    }
}
