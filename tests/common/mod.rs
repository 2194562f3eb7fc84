//! Shared fixtures for integration tests
//!
//! Market data is frozen at 2021-06-15, so the reference period is 2021-06.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use rusty_yapo::prelude::*;
use std::sync::Arc;

pub const ABC: &str = "test/ABC";
pub const DEF: &str = "test/DEF";
pub const SHORT: &str = "test/SHORT";
pub const RISE_A: &str = "test/RISE_A";
pub const RISE_B: &str = "test/RISE_B";
pub const USD_FUND: &str = "test/USD_FUND";
pub const DAILY: &str = "test/DAILY";
pub const DECADE: &str = "nlu/922";

pub const MONTHLY_INFLATION: f64 = 0.005;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn period(s: &str) -> Period {
    s.parse().unwrap()
}

/// Consecutive periods starting at `start`
pub fn periods_from(start: &str, count: usize) -> Vec<Period> {
    let start = period(start);
    (0..count as i64).map(|k| start + k).collect()
}

/// Deterministic zig-zag growth path
pub fn zigzag(count: usize, base: f64) -> Vec<f64> {
    (0..count)
        .map(|k| {
            let bump = if k % 2 == 0 { 1.0 } else { 1.02 };
            base * 1.01_f64.powi(k as i32) * bump
        })
        .collect()
}

/// Rate of RUB per USD for a period
pub fn usd_rub(p: Period) -> f64 {
    60.0 + (p.month() as f64)
}

fn monthly_rows(start: &str, closes: &[f64]) -> Vec<PriceRow> {
    periods_from(start, closes.len())
        .into_iter()
        .zip(closes)
        .map(|(p, close)| PriceRow::labeled(p.to_string(), *close))
        .collect()
}

/// Daily rows for 2021-03-01 ..= 2021-06-14, close = day of year
pub fn daily_rows() -> Vec<PriceRow> {
    let first = Utc.with_ymd_and_hms(2021, 3, 1, 18, 0, 0).unwrap();
    let last = Utc.with_ymd_and_hms(2021, 6, 14, 18, 0, 0).unwrap();
    let mut rows = Vec::new();
    let mut day = first;
    while day <= last {
        rows.push(PriceRow::at(day, day.format("%j").to_string().parse::<f64>().unwrap()));
        day += chrono::Duration::days(1);
    }
    rows
}

/// Decade rows for 2020-01 ..= 2020-06; the closing sample is `100 + month`
pub fn decade_rows() -> Vec<PriceRow> {
    let mut rows = Vec::new();
    for month in 1..=6u32 {
        for marker in 1..=3u32 {
            let close = if marker == 3 { 100.0 + month as f64 } else { 1.0 };
            rows.push(PriceRow::labeled(format!("2020-{:02}-{}", month, marker), close));
        }
    }
    rows
}

pub fn symbol(namespace_ticker: &str) -> FinancialSymbol {
    registry().lookup(namespace_ticker).unwrap()
}

pub fn registry() -> InMemorySymbolRegistry {
    let rub_month = |name: &str| {
        let (ns, ticker) = name.split_once('/').unwrap();
        FinancialSymbol::new(ns, ticker, Currency::RUB, SecurityType::StockEtf, Granularity::Month)
    };
    vec![
        rub_month(ABC),
        rub_month(DEF),
        rub_month(SHORT),
        rub_month(RISE_A),
        rub_month(RISE_B),
        FinancialSymbol::new("test", "USD_FUND", Currency::USD, SecurityType::MutualFund, Granularity::Month),
        FinancialSymbol::new("test", "DAILY", Currency::RUB, SecurityType::StockEtf, Granularity::Day),
        FinancialSymbol::new("nlu", "922", Currency::RUB, SecurityType::MutualFund, Granularity::Decade)
            .with_names("Sberbank Natural Resources", None),
    ]
    .into_iter()
    .collect()
}

pub fn prices() -> InMemoryPriceSource {
    let mut prices = InMemoryPriceSource::new();
    prices.add_rows(ABC, monthly_rows("2015-1", &zigzag(77, 100.0)));
    prices.add_rows(DEF, monthly_rows("2017-1", &zigzag(53, 40.0)));
    prices.add_rows(SHORT, monthly_rows("2020-1", &[100.0, 110.0, 99.0]));
    prices.add_rows(RISE_A, monthly_rows("2020-1", &[100.0, 110.0]));
    prices.add_rows(RISE_B, monthly_rows("2020-1", &[50.0, 60.0]));
    prices.add_rows(USD_FUND, monthly_rows("2019-1", &zigzag(24, 10.0)));
    prices.add_rows(DAILY, daily_rows());
    prices.add_rows(DECADE, decade_rows());
    prices
}

pub fn currency_rates() -> InMemoryCurrencyRates {
    let mut rates = InMemoryCurrencyRates::new();
    for p in periods_from("2018-1", 48) {
        rates.add_rate(Currency::USD, Currency::RUB, p, usd_rub(p)).unwrap();
    }
    rates
}

pub fn inflation() -> InMemoryInflation {
    let periods = periods_from("2010-1", 144);
    let series = MonthlySeries::from_rows(periods.into_iter().map(|p| (p, MONTHLY_INFLATION)).collect()).unwrap();
    let mut inflation = InMemoryInflation::new();
    inflation.set_series(Currency::RUB, series);
    inflation
}

pub fn clock() -> FixedClock {
    FixedClock::at_date(2021, 6, 15).unwrap()
}

/// Market without an inflation source
pub fn bare_market() -> MarketData {
    init_logging();
    MarketData::new(Arc::new(prices()), Arc::new(currency_rates()), Arc::new(registry()))
        .with_clock(Arc::new(clock()))
}

pub fn market() -> MarketData {
    bare_market().with_inflation(Arc::new(inflation()))
}

pub fn asset(name: &str, start: &str, end: &str) -> Asset {
    Asset::new(market(), symbol(name), period(start), period(end), Currency::RUB).unwrap()
}
