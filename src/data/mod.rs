//! Market data plumbing
//!
//! Raw rows come from a [`PriceSource`](sources::PriceSource), get normalized
//! to monthly periods by [`PeriodNormalizer`](resample::PeriodNormalizer) and
//! rebased by [`CurrencyConverter`](fx::CurrencyConverter). [`MarketData`]
//! bundles the collaborators every [`Asset`](crate::asset::Asset) needs.

pub mod frequency;
pub mod fx;
pub mod inflation;
pub mod resample;
pub mod series;
pub mod sources;

use crate::assets::SymbolRegistry;
use crate::clock::{Clock, SystemClock};
use fx::CurrencyRateRegistry;
use inflation::InflationSource;
use sources::PriceSource;
use std::fmt;
use std::sync::Arc;

/// Shared handles to the external collaborators and the reference clock
#[derive(Clone)]
pub struct MarketData {
    prices: Arc<dyn PriceSource>,
    currency_rates: Arc<dyn CurrencyRateRegistry>,
    symbols: Arc<dyn SymbolRegistry>,
    inflation: Option<Arc<dyn InflationSource>>,
    clock: Arc<dyn Clock>,
}

impl MarketData {
    /// Create a context using the system clock and no inflation source
    pub fn new(
        prices: Arc<dyn PriceSource>,
        currency_rates: Arc<dyn CurrencyRateRegistry>,
        symbols: Arc<dyn SymbolRegistry>,
    ) -> Self {
        Self {
            prices,
            currency_rates,
            symbols,
            inflation: None,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_inflation(mut self, inflation: Arc<dyn InflationSource>) -> Self {
        self.inflation = Some(inflation);
        self
    }

    pub fn prices(&self) -> &dyn PriceSource {
        self.prices.as_ref()
    }

    pub fn currency_rates(&self) -> &dyn CurrencyRateRegistry {
        self.currency_rates.as_ref()
    }

    pub fn symbols(&self) -> &dyn SymbolRegistry {
        self.symbols.as_ref()
    }

    pub fn inflation(&self) -> Option<&dyn InflationSource> {
        self.inflation.as_deref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

impl fmt::Debug for MarketData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketData")
            .field("now", &self.clock.now())
            .field("inflation", &if self.inflation.is_some() { "<Some(InflationSource)>" } else { "None" })
            .finish()
    }
}
