//! Return, growth and risk arithmetic shared by assets and portfolios

use crate::currency::Currency;
use crate::error::{Result, YapoError};
use crate::period::Period;
use crate::types::{Rate, MONTHS_IN_YEAR};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fmt;
use std::str::FromStr;

/// Horizon of a risk figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskPeriod {
    /// Standard deviation of monthly returns
    Month,
    /// Monthly risk compounded over twelve months
    Year,
}

impl FromStr for RiskPeriod {
    type Err = YapoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "month" => Ok(RiskPeriod::Month),
            "year" => Ok(RiskPeriod::Year),
            _ => Err(YapoError::InvalidArgument(format!(
                "unexpected value of period: {}",
                s
            ))),
        }
    }
}

/// Scalar inflation statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InflationKind {
    /// Compounded inflation over the whole window
    Accumulated,
    /// Arithmetic mean of monthly inflation
    ArithmeticMean,
    /// Annualized geometric mean
    GeometricMean,
}

impl FromStr for InflationKind {
    type Err = YapoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "accumulated" => Ok(InflationKind::Accumulated),
            "a_mean" => Ok(InflationKind::ArithmeticMean),
            "g_mean" => Ok(InflationKind::GeometricMean),
            _ => Err(YapoError::InvalidArgument(format!(
                "unexpected value of inflation kind: {}",
                s
            ))),
        }
    }
}

/// Fractional change versus the previous value; the first element is 0
pub fn pct_change(values: &[f64]) -> Vec<Rate> {
    let mut changes = Vec::with_capacity(values.len());
    if !values.is_empty() {
        changes.push(0.0);
    }
    changes.extend(values.windows(2).map(|w| w[1] / w[0] - 1.0));
    changes
}

/// Running product of `(1 + r)` minus one
pub fn accumulate(returns: &[Rate]) -> Vec<Rate> {
    returns
        .iter()
        .scan(1.0, |growth, r| {
            *growth *= 1.0 + r;
            Some(*growth - 1.0)
        })
        .collect()
}

/// Product of `(1 + r)`
pub fn total_growth(returns: &[Rate]) -> f64 {
    returns.iter().map(|r| 1.0 + r).product()
}

/// Geometric annual rate of `returns` spread over `years`
pub fn annualize(returns: &[Rate], years: f64) -> Result<Rate> {
    if years <= 0.0 {
        return Err(YapoError::UndefinedGrowthRate(format!(
            "time span of {} years",
            years
        )));
    }
    Ok(total_growth(returns).powf(1.0 / years) - 1.0)
}

/// Length in years of the span between two periods
pub fn years_between(period_min: Period, period_max: Period) -> f64 {
    (period_max - period_min) as f64 / MONTHS_IN_YEAR as f64
}

/// Returns with the defined-as-zero first element dropped.
///
/// At least two usable returns are required for a standard deviation.
fn usable_returns(returns: &[Rate]) -> Result<&[Rate]> {
    let usable = returns.get(1..).unwrap_or(&[]);
    match usable.len() {
        0 => Err(YapoError::EmptyWindow(
            "no monthly returns in window".to_string(),
        )),
        1 => Err(YapoError::InvalidArgument(
            "risk requires at least 2 monthly returns".to_string(),
        )),
        _ => Ok(usable),
    }
}

/// Risk of a return series whose first element is the zero baseline
pub fn risk(returns: &[Rate], period: RiskPeriod) -> Result<f64> {
    let usable = usable_returns(returns)?;
    let monthly = usable.iter().population_std_dev();
    match period {
        RiskPeriod::Month => Ok(monthly),
        RiskPeriod::Year => {
            let mean = usable.iter().map(|r| 1.0 + r).mean();
            // Rounding can push a zero variance slightly negative
            let variance = (monthly.powi(2) + mean.powi(2)).powi(12) - mean.powi(24);
            Ok(variance.max(0.0).sqrt())
        }
    }
}

/// `(1 + r) / (1 + i) - 1` elementwise
pub fn real_returns(returns: &[Rate], inflation: &[Rate]) -> Result<Vec<Rate>> {
    if returns.len() != inflation.len() {
        return Err(YapoError::InvalidArgument(format!(
            "{} returns but {} inflation values",
            returns.len(),
            inflation.len()
        )));
    }
    Ok(returns
        .iter()
        .zip(inflation)
        .map(|(r, i)| (1.0 + r) / (1.0 + i) - 1.0)
        .collect())
}

/// Statistics snapshot of an asset or portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub name: String,
    pub currency: Currency,
    pub period_min: Period,
    pub period_max: Period,
    pub periods: usize,
    pub accumulated_return: f64,
    /// `None` when the window spans a single month
    pub cagr: Option<f64>,
    /// `None` with fewer than two monthly returns
    pub risk_month: Option<f64>,
    pub risk_year: Option<f64>,
}

impl StatisticsSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}%", v * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

impl fmt::Display for StatisticsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics: {} ({})", self.name, self.currency)?;
        writeln!(
            f,
            "  Window:             {} .. {} ({} periods)",
            self.period_min, self.period_max, self.periods
        )?;
        writeln!(
            f,
            "  Accumulated Return: {:.2}%",
            self.accumulated_return * 100.0
        )?;
        writeln!(f, "  CAGR:               {}", percent(self.cagr))?;
        writeln!(f, "  Risk (month):       {}", percent(self.risk_month))?;
        writeln!(f, "  Risk (year):        {}", percent(self.risk_year))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pct_change() {
        let changes = pct_change(&[100.0, 110.0, 99.0]);
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0], 0.0);
        assert_relative_eq!(changes[1], 0.10, epsilon = 1e-12);
        assert_relative_eq!(changes[2], -0.10, epsilon = 1e-12);
        assert!(pct_change(&[]).is_empty());
    }

    #[test]
    fn test_accumulate() {
        let acc = accumulate(&[0.0, 0.10, -0.10]);
        assert_eq!(acc[0], 0.0);
        assert_relative_eq!(acc[1], 0.10, epsilon = 1e-12);
        assert_relative_eq!(acc[2], -0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_annualize() {
        // 21% over two years is 10% a year
        assert_relative_eq!(annualize(&[0.0, 0.21], 2.0).unwrap(), 0.10, epsilon = 1e-12);
        assert!(matches!(
            annualize(&[0.0], 0.0),
            Err(YapoError::UndefinedGrowthRate(_))
        ));
    }

    #[test]
    fn test_monthly_risk_is_population_std() {
        let returns = [0.0, 0.1, -0.1, 0.1, -0.1];
        assert_relative_eq!(risk(&returns, RiskPeriod::Month).unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_yearly_risk_formula() {
        let returns = [0.0, 0.02, -0.01, 0.03];
        let m = risk(&returns, RiskPeriod::Month).unwrap();
        let mean = (1.02 + 0.99 + 1.03) / 3.0;
        let expected = ((m * m + mean * mean).powi(12) - mean.powi(24)).sqrt();
        assert_relative_eq!(risk(&returns, RiskPeriod::Year).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_yearly_risk_of_constant_returns_is_zero() {
        for r in [0.01, 0.013, 0.07, -0.03] {
            let returns = [0.0, r, r, r, r, r];
            let yearly = risk(&returns, RiskPeriod::Year).unwrap();
            assert!(yearly.is_finite());
            assert_relative_eq!(yearly, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_risk_needs_two_returns() {
        assert!(matches!(risk(&[0.0], RiskPeriod::Year), Err(YapoError::EmptyWindow(_))));
        assert!(matches!(risk(&[], RiskPeriod::Month), Err(YapoError::EmptyWindow(_))));
        assert!(matches!(
            risk(&[0.0, 0.1], RiskPeriod::Year),
            Err(YapoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_risk_period_from_str() {
        assert_eq!("month".parse::<RiskPeriod>().unwrap(), RiskPeriod::Month);
        let err = "week".parse::<RiskPeriod>().unwrap_err();
        assert!(err.to_string().contains("unexpected value of period"));
    }

    #[test]
    fn test_inflation_kind_from_str() {
        assert_eq!("g_mean".parse::<InflationKind>().unwrap(), InflationKind::GeometricMean);
        assert!("abracadabra".parse::<InflationKind>().is_err());
    }

    #[test]
    fn test_real_returns() {
        let real = real_returns(&[0.0, 0.21], &[0.0, 0.10]).unwrap();
        assert_relative_eq!(real[1], 0.10, epsilon = 1e-12);
        assert!(real_returns(&[0.0], &[]).is_err());
    }
}
