//! # rusty_yapo
//!
//! Portfolio analytics over monthly return series.
//!
//! Raw price rows for a financial symbol are normalized to one value per
//! calendar month, converted into a target currency and turned into rates
//! of return. Assets can be combined into weighted portfolios, and both
//! expose accumulated return, compound annual growth rate, risk and
//! inflation-adjusted figures.
//!
//! ## Example
//!
//! ```rust
//! use rusty_yapo::prelude::*;
//! use std::sync::Arc;
//!
//! let symbol = FinancialSymbol::new("micex", "SBER", Currency::RUB, SecurityType::StockEtf, Granularity::Month);
//!
//! let mut prices = InMemoryPriceSource::new();
//! prices.add_rows("micex/SBER", vec![
//!     PriceRow::labeled("2020-01", 100.0),
//!     PriceRow::labeled("2020-02", 110.0),
//!     PriceRow::labeled("2020-03", 99.0),
//! ]);
//! let symbols: InMemorySymbolRegistry = vec![symbol.clone()].into_iter().collect();
//!
//! let market = MarketData::new(Arc::new(prices), Arc::new(InMemoryCurrencyRates::new()), Arc::new(symbols))
//!     .with_clock(Arc::new(FixedClock::at_date(2021, 6, 15).unwrap()));
//!
//! let start = Period::new(2020, 1).unwrap();
//! let end = Period::new(2020, 3).unwrap();
//! let asset = Asset::new(market, symbol, start, end, Currency::RUB).unwrap();
//! assert_eq!(asset.rate_of_return().len(), 3);
//! ```

pub mod asset;
pub mod assets;
pub mod clock;
pub mod config;
pub mod currency;
pub mod data;
pub mod error;
pub mod performance;
pub mod period;
pub mod portfolio;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::asset::Asset;
    pub use crate::assets::{FinancialSymbol, InMemorySymbolRegistry, SecurityType, SymbolRegistry};
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::{AssetConfig, PortfolioConfig};
    pub use crate::currency::{Currency, CurrencyPair};
    pub use crate::data::frequency::Granularity;
    pub use crate::data::fx::{CurrencyConverter, CurrencyRateRegistry, InMemoryCurrencyRates};
    pub use crate::data::inflation::{InMemoryInflation, InflationSource};
    pub use crate::data::series::{MonthlySeries, Observation, PriceRow};
    pub use crate::data::sources::{InMemoryPriceSource, PriceSource};
    pub use crate::data::MarketData;
    pub use crate::error::{Result, YapoError};
    pub use crate::performance::{InflationKind, RiskPeriod, StatisticsSummary};
    pub use crate::period::Period;
    pub use crate::portfolio::Portfolio;
    pub use crate::types::*;
}
