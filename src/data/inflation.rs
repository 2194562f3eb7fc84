//! Monthly inflation series per currency

use crate::currency::Currency;
use crate::data::series::MonthlySeries;
use crate::error::{Result, YapoError};
use crate::period::Period;
use hashbrown::HashMap;
use serde::Deserialize;
use std::io::Read;

/// Source of monthly inflation rates (0.01 == 1% month over month)
pub trait InflationSource: Send + Sync {
    fn inflation(&self, currency: Currency) -> Result<MonthlySeries>;
}

/// CSV row: `currency,period,rate`
#[derive(Debug, Deserialize)]
struct InflationRecord {
    currency: Currency,
    period: Period,
    rate: f64,
}

/// Inflation series held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryInflation {
    series: HashMap<Currency, MonthlySeries>,
}

impl InMemoryInflation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the series of a currency
    pub fn set_series(&mut self, currency: Currency, series: MonthlySeries) {
        self.series.insert(currency, series);
    }

    /// Load rates from CSV with header `currency,period,rate`
    pub fn load_from_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut rows: HashMap<Currency, Vec<(Period, f64)>> = HashMap::new();
        let mut count = 0;
        for record in reader.deserialize() {
            let record: InflationRecord = record?;
            rows.entry(record.currency)
                .or_default()
                .push((record.period, record.rate));
            count += 1;
        }
        for (currency, rows) in rows {
            self.set_series(currency, MonthlySeries::from_rows(rows)?);
        }
        log::debug!("Loaded {} inflation rows", count);
        Ok(count)
    }
}

impl InflationSource for InMemoryInflation {
    fn inflation(&self, currency: Currency) -> Result<MonthlySeries> {
        self.series
            .get(&currency)
            .cloned()
            .ok_or_else(|| YapoError::MissingData(format!("no inflation series for {}", currency)))
    }
}
