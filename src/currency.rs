//! Currency types

use crate::error::{Result, YapoError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency enumeration (ISO 4217 codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    /// Russian Ruble
    RUB,
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Swiss Franc
    CHF,
    /// Japanese Yen
    JPY,
    /// Chinese Yuan
    CNY,
}

impl Currency {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::RUB => "RUB",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
            Currency::JPY => "JPY",
            Currency::CNY => "CNY",
        }
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::RUB => "₽",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::CHF => "CHF",
            Currency::JPY => "¥",
            Currency::CNY => "¥",
        }
    }

    /// Get all supported currencies
    pub fn all() -> Vec<Currency> {
        vec![
            Currency::RUB,
            Currency::USD,
            Currency::EUR,
            Currency::GBP,
            Currency::CHF,
            Currency::JPY,
            Currency::CNY,
        ]
    }
}

impl FromStr for Currency {
    type Err = YapoError;

    fn from_str(code: &str) -> Result<Self> {
        let code = code.trim().to_uppercase();
        Currency::all()
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| YapoError::ParseError(format!("Unknown currency: {}", code)))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Currency pair: one unit of `base` is worth `rate` units of `quote`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create new currency pair
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Get the inverse pair
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.base == self.quote
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
