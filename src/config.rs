//! Portfolio request configuration
//!
//! ```toml
//! currency = "RUB"
//! start_period = "2011-1"
//! end_period = "2017-2"
//!
//! [[assets]]
//! name = "micex/SBER"
//! weight = 0.6
//!
//! [[assets]]
//! name = "micex/MCFTR"
//! weight = 0.4
//! ```

use crate::asset::Asset;
use crate::currency::Currency;
use crate::data::MarketData;
use crate::error::{Result, YapoError};
use crate::period::Period;
use crate::portfolio::Portfolio;
use crate::types::Weight;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tolerance for the weights-sum sanity warning
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// One asset entry of a portfolio request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Symbol id, `namespace/ticker`
    pub name: String,
    pub weight: Weight,
}

/// Portfolio request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    pub currency: Currency,
    pub start_period: Period,
    pub end_period: Period,
    #[serde(default)]
    pub assets: Vec<AssetConfig>,
}

impl PortfolioConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: PortfolioConfig = toml::from_str(contents)
            .map_err(|e| YapoError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        log::info!("Loaded portfolio config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_period > self.end_period {
            return Err(YapoError::ConfigError(format!(
                "start_period {} is after end_period {}",
                self.start_period, self.end_period
            )));
        }
        if self.assets.is_empty() {
            return Err(YapoError::ConfigError("no assets configured".to_string()));
        }
        if let Some(bad) = self.assets.iter().find(|a| !a.weight.is_finite()) {
            return Err(YapoError::ConfigError(format!(
                "weight of {} is not finite",
                bad.name
            )));
        }

        let total: Weight = self.weights().iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            log::warn!("Portfolio weights sum to {}, not 1", total);
        }
        Ok(())
    }

    pub fn weights(&self) -> Vec<Weight> {
        self.assets.iter().map(|a| a.weight).collect()
    }

    /// Resolve symbols and build the portfolio
    pub fn build(&self, market: &MarketData) -> Result<Portfolio> {
        let assets = self
            .assets
            .iter()
            .map(|entry| {
                let symbol = market.symbols().lookup(&entry.name)?;
                Asset::new(
                    market.clone(),
                    symbol,
                    self.start_period,
                    self.end_period,
                    self.currency,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Portfolio::new(
            &assets,
            &self.weights(),
            self.start_period,
            self.end_period,
            self.currency,
        )
    }
}
