//! Financial symbol metadata

use crate::currency::Currency;
use crate::data::frequency::Granularity;
use crate::error::{Result, YapoError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of security behind a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityType {
    /// Exchange-traded stock or ETF
    StockEtf,
    /// Mutual fund
    MutualFund,
    /// Currency quoted against another currency
    Currency,
    /// Inflation index
    Inflation,
    /// Market index
    Index,
}

impl SecurityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityType::StockEtf => "stock_etf",
            SecurityType::MutualFund => "mutual_fund",
            SecurityType::Currency => "currency",
            SecurityType::Inflation => "inflation",
            SecurityType::Index => "index",
        }
    }
}

impl FromStr for SecurityType {
    type Err = YapoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "stock_etf" => Ok(SecurityType::StockEtf),
            "mutual_fund" => Ok(SecurityType::MutualFund),
            "currency" => Ok(SecurityType::Currency),
            "inflation" => Ok(SecurityType::Inflation),
            "index" => Ok(SecurityType::Index),
            _ => Err(YapoError::ParseError(format!("Unknown security type: {}", s))),
        }
    }
}

/// Metadata of a tradable or reference series, addressed as `namespace/ticker`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSymbol {
    pub namespace: String,
    pub ticker: String,
    pub isin: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub exchange: Option<String>,
    /// Native currency of the price series
    pub currency: Currency,
    pub security_type: SecurityType,
    /// Sampling of the raw price series
    pub granularity: Granularity,
    /// Passed through from the source, not used by the statistics
    pub adjusted_close: bool,
}

impl FinancialSymbol {
    /// Create a symbol with the required fields
    pub fn new(
        namespace: impl Into<String>,
        ticker: impl Into<String>,
        currency: Currency,
        security_type: SecurityType,
        granularity: Granularity,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            ticker: ticker.into(),
            isin: None,
            short_name: None,
            long_name: None,
            exchange: None,
            currency,
            security_type,
            granularity,
            adjusted_close: false,
        }
    }

    pub fn with_isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }

    pub fn with_names(mut self, short_name: impl Into<String>, long_name: Option<String>) -> Self {
        self.short_name = Some(short_name.into());
        self.long_name = long_name;
        self
    }

    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    pub fn with_adjusted_close(mut self, adjusted_close: bool) -> Self {
        self.adjusted_close = adjusted_close;
        self
    }

    /// Full identifier (`namespace/ticker`)
    pub fn name(&self) -> String {
        format!("{}/{}", self.namespace, self.ticker)
    }
}

impl fmt::Display for FinancialSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FinancialSymbol({}, {}, {})",
            self.name(),
            self.currency,
            self.granularity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_creation() {
        let symbol = FinancialSymbol::new(
            "micex",
            "SBER",
            Currency::RUB,
            SecurityType::StockEtf,
            Granularity::Day,
        )
        .with_isin("RU0009029540")
        .with_names("Сбербанк", Some("Сбербанк России ПАО ао".to_string()))
        .with_exchange("MICEX")
        .with_adjusted_close(true);

        assert_eq!(symbol.name(), "micex/SBER");
        assert_eq!(symbol.isin.as_deref(), Some("RU0009029540"));
        assert_eq!(symbol.exchange.as_deref(), Some("MICEX"));
        assert!(symbol.adjusted_close);
        assert_eq!(symbol.to_string(), "FinancialSymbol(micex/SBER, RUB, day)");
    }

    #[test]
    fn test_security_type_from_str() {
        assert_eq!("inflation".parse::<SecurityType>().unwrap(), SecurityType::Inflation);
        assert_eq!(SecurityType::StockEtf.as_str(), "stock_etf");
        assert!("bond".parse::<SecurityType>().is_err());
    }
}
