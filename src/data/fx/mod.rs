//! Currency rate system
//!
//! Rebases monthly price series from one currency into another.
//!
//! # Components
//!
//! - **base**: the [`CurrencyRateRegistry`] trait
//! - **in_memory**: in-memory rate storage with inverse and cross-rate resolution
//! - **utils**: the [`CurrencyConverter`]
//!
//! # Example
//!
//! ```rust
//! use rusty_yapo::currency::Currency;
//! use rusty_yapo::data::fx::{CurrencyConverter, InMemoryCurrencyRates};
//! use rusty_yapo::data::series::MonthlySeries;
//! use rusty_yapo::period::Period;
//!
//! let jan = Period::new(2024, 1).unwrap();
//! let mut rates = InMemoryCurrencyRates::new();
//! rates.add_rate(Currency::USD, Currency::RUB, jan, 90.0).unwrap();
//!
//! let prices = MonthlySeries::from_rows(vec![(jan, 2.0)]).unwrap();
//! let converted = CurrencyConverter::new(&rates)
//!     .convert(prices, Currency::USD, Currency::RUB)
//!     .unwrap();
//! assert_eq!(converted.values(), &[180.0]);
//! ```

pub mod base;
pub mod in_memory;
pub mod utils;

pub use base::CurrencyRateRegistry;
pub use in_memory::InMemoryCurrencyRates;
pub use utils::CurrencyConverter;
