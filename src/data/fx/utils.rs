//! Currency conversion of monthly series

use super::base::CurrencyRateRegistry;
use crate::currency::{Currency, CurrencyPair};
use crate::data::series::MonthlySeries;
use crate::error::{Result, YapoError};

/// Rebases monthly series into another currency
#[derive(Clone, Copy)]
pub struct CurrencyConverter<'a> {
    registry: &'a dyn CurrencyRateRegistry,
}

impl<'a> CurrencyConverter<'a> {
    pub fn new(registry: &'a dyn CurrencyRateRegistry) -> Self {
        Self { registry }
    }

    /// Convert `series` from `from` into `to`.
    ///
    /// Identical currencies return the input untouched. Every period of
    /// `series` must have a rate, gaps fail with `MissingData`.
    pub fn convert(&self, series: MonthlySeries, from: Currency, to: Currency) -> Result<MonthlySeries> {
        let pair = CurrencyPair::new(from, to);
        if pair.is_identity() {
            return Ok(series);
        }

        let rates = self.registry.rates(from, to)?;
        log::debug!("Converting {} rows via {}", series.len(), pair);

        let converted = series
            .iter()
            .map(|(period, close)| {
                rates
                    .get(period)
                    .map(|rate| (period, close * rate))
                    .ok_or_else(|| {
                        YapoError::MissingData(format!("no {} rate for period {}", pair, period))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        MonthlySeries::from_rows(converted)
    }
}
