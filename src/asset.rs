//! Portfolio asset - one security as a monthly return series
//!
//! An [`Asset`] owns the normalized, currency-converted close prices of a
//! symbol over a requested window together with the per-period rate of
//! return. Assets are immutable; [`Asset::align_to_window`] derives a new one.

use crate::assets::FinancialSymbol;
use crate::currency::Currency;
use crate::data::fx::CurrencyConverter;
use crate::data::resample::PeriodNormalizer;
use crate::data::series::MonthlySeries;
use crate::data::MarketData;
use crate::error::{Result, YapoError};
use crate::performance::{self, InflationKind, RiskPeriod, StatisticsSummary};
use crate::period::Period;
use crate::portfolio::Portfolio;
use crate::types::{Price, Rate, MONTHS_IN_YEAR};
use std::fmt;

/// One security over a monthly window in a single currency
#[derive(Debug, Clone)]
pub struct Asset {
    market: MarketData,
    symbol: FinancialSymbol,
    start_period: Period,
    end_period: Period,
    currency: Currency,
    periods: Vec<Period>,
    close: Vec<Price>,
    returns: Vec<Rate>,
}

impl Asset {
    /// Build an asset for `symbol` over `[start_period, end_period]` in `currency`
    pub fn new(
        market: MarketData,
        symbol: FinancialSymbol,
        start_period: Period,
        end_period: Period,
        currency: Currency,
    ) -> Result<Self> {
        let values = Self::load_values(&market, &symbol, start_period, end_period, currency)?;
        let (periods, close) = values.into_columns();
        let returns = performance::pct_change(&close);

        log::debug!(
            "Built asset {} over {}..{} in {}: {} periods",
            symbol.name(),
            start_period,
            end_period,
            currency,
            periods.len()
        );

        Ok(Self {
            market,
            symbol,
            start_period,
            end_period,
            currency,
            periods,
            close,
            returns,
        })
    }

    fn load_values(
        market: &MarketData,
        symbol: &FinancialSymbol,
        start_period: Period,
        end_period: Period,
        currency: Currency,
    ) -> Result<MonthlySeries> {
        if start_period > end_period {
            return Ok(MonthlySeries::new());
        }

        let reference = market.clock().reference_period();
        let rows = market.prices().fetch(symbol, start_period, reference)?;
        let normalized = PeriodNormalizer::from_clock(market.clock())
            .normalize(rows, symbol.granularity)?
            .window(start_period, end_period);

        CurrencyConverter::new(market.currency_rates()).convert(
            normalized,
            symbol.currency,
            currency,
        )
    }

    /// Rebuild this asset's symbol over another window and currency.
    ///
    /// `self` is left untouched.
    pub fn align_to_window(&self, start_period: Period, end_period: Period, currency: Currency) -> Result<Asset> {
        Asset::new(
            self.market.clone(),
            self.symbol.clone(),
            start_period,
            end_period,
            currency,
        )
    }

    pub fn symbol(&self) -> &FinancialSymbol {
        &self.symbol
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn start_period(&self) -> Period {
        self.start_period
    }

    pub fn end_period(&self) -> Period {
        self.end_period
    }

    /// First period with data, `None` for an empty window
    pub fn period_min(&self) -> Option<Period> {
        self.periods.first().copied()
    }

    /// Last period with data, `None` for an empty window
    pub fn period_max(&self) -> Option<Period> {
        self.periods.last().copied()
    }

    pub(crate) fn bounds(&self) -> Option<(Period, Period)> {
        Some((self.period_min()?, self.period_max()?))
    }

    fn require_bounds(&self) -> Result<(Period, Period)> {
        self.bounds().ok_or_else(|| {
            YapoError::EmptyWindow(format!(
                "{} has no data within {}..{}",
                self.symbol.name(),
                self.start_period,
                self.end_period
            ))
        })
    }

    pub fn close(&self) -> &[Price] {
        &self.close
    }

    pub fn rate_of_return(&self) -> &[Rate] {
        &self.returns
    }

    pub fn period(&self) -> &[Period] {
        &self.periods
    }

    pub fn accumulated_rate_of_return(&self) -> Vec<Rate> {
        performance::accumulate(&self.returns)
    }

    /// Risk of this asset as a single-asset portfolio
    pub fn risk(&self, period: RiskPeriod) -> Result<f64> {
        Portfolio::new(
            std::slice::from_ref(self),
            &[1.0],
            self.start_period,
            self.end_period,
            self.currency,
        )?
        .risk(period)
    }

    /// Compound annual growth rate over the whole window (`None`) or the
    /// trailing `years_ago` years.
    ///
    /// A trailing window longer than the available history falls back to the
    /// whole window.
    pub fn compound_annual_growth_rate(&self, years_ago: Option<u32>) -> Result<Rate> {
        self.growth_rate_of(&self.returns, years_ago)
    }

    /// [`compound_annual_growth_rate`](Self::compound_annual_growth_rate) for each entry, in order
    pub fn compound_annual_growth_rates(&self, years_ago: &[Option<u32>]) -> Result<Vec<Rate>> {
        years_ago
            .iter()
            .map(|y| self.compound_annual_growth_rate(*y))
            .collect()
    }

    fn growth_rate_of(&self, returns: &[Rate], years_ago: Option<u32>) -> Result<Rate> {
        let (period_min, period_max) = self.require_bounds()?;
        match years_ago {
            None => performance::annualize(returns, performance::years_between(period_min, period_max)),
            Some(0) => Err(YapoError::InvalidArgument(
                "years_ago must be a positive integer".to_string(),
            )),
            Some(years) => {
                let months = i64::from(years) * MONTHS_IN_YEAR;
                if months > period_max - period_min {
                    return self.growth_rate_of(returns, None);
                }
                let window_start = period_max - months;
                let first = self.periods.partition_point(|p| *p <= window_start);
                performance::annualize(&returns[first..], years as f64)
            }
        }
    }

    /// Monthly inflation of the asset currency aligned to [`period`](Self::period).
    ///
    /// The first element is 0, matching the rate of return baseline.
    pub fn inflation_values(&self) -> Result<Vec<Rate>> {
        let source = self.market.inflation().ok_or_else(|| {
            YapoError::MissingData("no inflation source configured".to_string())
        })?;
        let series = source.inflation(self.currency)?;

        self.periods
            .iter()
            .enumerate()
            .map(|(idx, period)| {
                if idx == 0 {
                    return Ok(0.0);
                }
                series.get(*period).ok_or_else(|| {
                    YapoError::MissingData(format!(
                        "no {} inflation for period {}",
                        self.currency, period
                    ))
                })
            })
            .collect()
    }

    /// Scalar inflation statistic over the asset window
    pub fn inflation(&self, kind: InflationKind) -> Result<Rate> {
        let (period_min, period_max) = self.require_bounds()?;
        let values = self.inflation_values()?;
        match kind {
            InflationKind::Accumulated => Ok(performance::total_growth(&values) - 1.0),
            InflationKind::ArithmeticMean => {
                let monthly = &values[1..];
                if monthly.is_empty() {
                    return Err(YapoError::EmptyWindow(
                        "no monthly inflation in window".to_string(),
                    ));
                }
                Ok(monthly.iter().sum::<f64>() / monthly.len() as f64)
            }
            InflationKind::GeometricMean => {
                performance::annualize(&values, performance::years_between(period_min, period_max))
            }
        }
    }

    /// Rate of return deflated by inflation of the asset currency
    pub fn rate_of_return_real(&self) -> Result<Vec<Rate>> {
        performance::real_returns(&self.returns, &self.inflation_values()?)
    }

    pub fn accumulated_rate_of_return_real(&self) -> Result<Vec<Rate>> {
        Ok(performance::accumulate(&self.rate_of_return_real()?))
    }

    /// Inflation-adjusted [`compound_annual_growth_rate`](Self::compound_annual_growth_rate)
    pub fn compound_annual_growth_rate_real(&self, years_ago: Option<u32>) -> Result<Rate> {
        self.growth_rate_of(&self.rate_of_return_real()?, years_ago)
    }

    pub fn compound_annual_growth_rates_real(&self, years_ago: &[Option<u32>]) -> Result<Vec<Rate>> {
        let real = self.rate_of_return_real()?;
        years_ago
            .iter()
            .map(|y| self.growth_rate_of(&real, *y))
            .collect()
    }

    /// Statistics snapshot; fails only for an empty window
    pub fn summary(&self) -> Result<StatisticsSummary> {
        let (period_min, period_max) = self.require_bounds()?;
        Ok(StatisticsSummary {
            name: self.symbol.name(),
            currency: self.currency,
            period_min,
            period_max,
            periods: self.periods.len(),
            accumulated_return: self.accumulated_rate_of_return().last().copied().unwrap_or(0.0),
            cagr: self.compound_annual_growth_rate(None).ok(),
            risk_month: performance::risk(&self.returns, RiskPeriod::Month).ok(),
            risk_year: performance::risk(&self.returns, RiskPeriod::Year).ok(),
        })
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Asset({}, {}..{}, {})",
            self.symbol.name(),
            self.start_period,
            self.end_period,
            self.currency
        )
    }
}
