//! Weighted portfolio of assets sharing one period axis

use crate::asset::Asset;
use crate::currency::Currency;
use crate::error::{Result, YapoError};
use crate::performance::{self, RiskPeriod, StatisticsSummary};
use crate::period::Period;
use crate::types::{Rate, Weight};

/// Ordered weighted assets re-aligned to their common window.
///
/// Construction rebuilds every input asset over the intersection of the
/// requested window and each asset's own data range, in one currency. The
/// portfolio owns those rebuilt copies; the inputs are not modified.
#[derive(Debug, Clone)]
pub struct Portfolio {
    assets: Vec<Asset>,
    weights: Vec<Weight>,
    currency: Currency,
    period_min: Period,
    period_max: Period,
}

impl Portfolio {
    pub fn new(
        assets: &[Asset],
        weights: &[Weight],
        start_period: Period,
        end_period: Period,
        currency: Currency,
    ) -> Result<Self> {
        if assets.is_empty() {
            return Err(YapoError::InvalidArgument(
                "portfolio needs at least one asset".to_string(),
            ));
        }
        if weights.len() != assets.len() {
            return Err(YapoError::InvalidArgument(format!(
                "{} weights for {} assets",
                weights.len(),
                assets.len()
            )));
        }

        let (period_min, period_max) = Self::common_window(assets, start_period, end_period);
        if period_min > period_max {
            log::warn!(
                "Portfolio window is empty: {} > {}",
                period_min,
                period_max
            );
        } else {
            log::debug!(
                "Aligning {} assets to {}..{} in {}",
                assets.len(),
                period_min,
                period_max,
                currency
            );
        }

        let assets = assets
            .iter()
            .map(|asset| asset.align_to_window(period_min, period_max, currency))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            assets,
            weights: weights.to_vec(),
            currency,
            period_min,
            period_max,
        })
    }

    /// Intersection of the requested window and every asset's data range.
    ///
    /// An asset without data makes the window empty (`min > max`).
    fn common_window(assets: &[Asset], start_period: Period, end_period: Period) -> (Period, Period) {
        assets.iter().fold((start_period, end_period), |(lo, hi), asset| {
            match asset.bounds() {
                Some((min, max)) => (lo.max(min), hi.min(max)),
                None => (lo, lo - 1),
            }
        })
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    /// (asset, weight) pairs in input order
    pub fn assets_weighted(&self) -> Vec<(&Asset, Weight)> {
        self.assets.iter().zip(self.weights.iter().copied()).collect()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn period_min(&self) -> Period {
        self.period_min
    }

    pub fn period_max(&self) -> Period {
        self.period_max
    }

    pub fn is_empty(&self) -> bool {
        self.period_min > self.period_max
    }

    /// Weighted sum of asset returns per period
    pub fn rate_of_return(&self) -> Result<Vec<Rate>> {
        if self.is_empty() {
            return Err(YapoError::EmptyWindow(format!(
                "portfolio window {}..{} is empty",
                self.period_min, self.period_max
            )));
        }

        let axis = self.assets[0].period();
        if let Some(misaligned) = self.assets.iter().find(|a| a.period() != axis) {
            return Err(YapoError::InvalidArgument(format!(
                "{} is not aligned with the portfolio period axis",
                misaligned.symbol().name()
            )));
        }
        if axis.is_empty() {
            return Err(YapoError::EmptyWindow(
                "portfolio assets have no data".to_string(),
            ));
        }

        let mut weighted = vec![0.0; axis.len()];
        for (asset, weight) in self.assets_weighted() {
            for (acc, r) in weighted.iter_mut().zip(asset.rate_of_return()) {
                *acc += weight * r;
            }
        }
        Ok(weighted)
    }

    pub fn accumulated_rate_of_return(&self) -> Result<Vec<Rate>> {
        Ok(performance::accumulate(&self.rate_of_return()?))
    }

    /// Monthly or annualized risk of the weighted returns
    pub fn risk(&self, period: RiskPeriod) -> Result<f64> {
        performance::risk(&self.rate_of_return()?, period)
    }

    /// Sum of per-asset compound annual growth rates.
    ///
    /// Weights are not applied here, unlike [`rate_of_return`](Self::rate_of_return).
    pub fn compound_annual_growth_rate(&self, years_ago: Option<u32>) -> Result<Rate> {
        self.assets
            .iter()
            .map(|asset| asset.compound_annual_growth_rate(years_ago))
            .sum()
    }

    /// [`compound_annual_growth_rate`](Self::compound_annual_growth_rate) for each entry, in order
    pub fn compound_annual_growth_rates(&self, years_ago: &[Option<u32>]) -> Result<Vec<Rate>> {
        years_ago
            .iter()
            .map(|y| self.compound_annual_growth_rate(*y))
            .collect()
    }

    /// Statistics snapshot; fails for an empty window
    pub fn summary(&self) -> Result<StatisticsSummary> {
        let returns = self.rate_of_return()?;
        let name = self
            .assets
            .iter()
            .map(|a| a.symbol().name())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(StatisticsSummary {
            name,
            currency: self.currency,
            period_min: self.period_min,
            period_max: self.period_max,
            periods: returns.len(),
            accumulated_return: performance::accumulate(&returns).last().copied().unwrap_or(0.0),
            cagr: self.compound_annual_growth_rate(None).ok(),
            risk_month: performance::risk(&returns, RiskPeriod::Month).ok(),
            risk_year: performance::risk(&returns, RiskPeriod::Year).ok(),
        })
    }
}
