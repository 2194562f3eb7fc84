//! Raw price sources
//!
//! Network adapters live outside this crate; they plug in through
//! [`PriceSource`]. [`InMemoryPriceSource`] serves pre-loaded rows.

use crate::assets::FinancialSymbol;
use crate::data::series::{Observation, PriceRow};
use crate::error::Result;
use crate::period::Period;
use chrono::{DateTime, NaiveDate, Utc};
use hashbrown::HashMap;
use serde::Deserialize;
use std::io::Read;

/// Source of raw price rows for a symbol
pub trait PriceSource: Send + Sync {
    /// Rows for `symbol` covering `[start, end]`, in any order
    fn fetch(&self, symbol: &FinancialSymbol, start: Period, end: Period) -> Result<Vec<PriceRow>>;
}

/// CSV row: `symbol,date,close`
#[derive(Debug, Deserialize)]
struct PriceRecord {
    symbol: String,
    date: String,
    close: f64,
}

/// Price rows held in memory, keyed by `namespace/ticker`
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    rows: HashMap<String, Vec<PriceRow>>,
}

impl InMemoryPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row for a symbol id
    pub fn add_row(&mut self, name: &str, row: PriceRow) {
        self.rows.entry(name.to_string()).or_default().push(row);
    }

    /// Append many rows for a symbol id
    pub fn add_rows<I: IntoIterator<Item = PriceRow>>(&mut self, name: &str, rows: I) {
        self.rows.entry(name.to_string()).or_default().extend(rows);
    }

    /// Load rows from CSV with header `symbol,date,close`.
    ///
    /// `date` is `YYYY-MM-DD`, RFC 3339, or a period label kept verbatim.
    pub fn load_from_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut count = 0;
        for record in reader.deserialize() {
            let record: PriceRecord = record?;
            let row = PriceRow {
                observed: parse_observation(&record.date),
                close: record.close,
            };
            self.add_row(&record.symbol, row);
            count += 1;
        }
        log::debug!("Loaded {} price rows", count);
        Ok(count)
    }

    /// Number of symbols with rows
    pub fn num_symbols(&self) -> usize {
        self.rows.len()
    }
}

fn parse_observation(date: &str) -> Observation {
    let date = date.trim();
    // Decade labels such as `2020-01-3` would also parse as dates
    if date.len() == 10 {
        if let Some(ts) = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Observation::At(ts.and_utc());
        }
    }
    match DateTime::parse_from_rfc3339(date) {
        Ok(dt) => Observation::At(dt.with_timezone(&Utc)),
        Err(_) => Observation::Label(date.to_string()),
    }
}

impl PriceSource for InMemoryPriceSource {
    fn fetch(&self, symbol: &FinancialSymbol, start: Period, end: Period) -> Result<Vec<PriceRow>> {
        let rows = match self.rows.get(&symbol.name()) {
            Some(rows) => rows,
            None => {
                log::warn!("No price rows for {}", symbol.name());
                return Ok(Vec::new());
            }
        };

        Ok(rows
            .iter()
            .filter(|row| match row.approximate_period() {
                Some(period) => period >= start && period <= end,
                None => true,
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SecurityType;
    use crate::currency::Currency;
    use crate::data::frequency::Granularity;
    use chrono::TimeZone;

    fn sber() -> FinancialSymbol {
        FinancialSymbol::new("micex", "SBER", Currency::RUB, SecurityType::StockEtf, Granularity::Day)
    }

    fn p(s: &str) -> Period {
        s.parse().unwrap()
    }

    #[test]
    fn test_fetch_filters_range() {
        let mut source = InMemoryPriceSource::new();
        source.add_rows(
            "micex/SBER",
            (1..=6).map(|m| PriceRow::at(Utc.with_ymd_and_hms(2020, m, 10, 0, 0, 0).unwrap(), m as f64)),
        );

        let rows = source.fetch(&sber(), p("2020-2"), p("2020-4")).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].close, 2.0);
    }

    #[test]
    fn test_fetch_unknown_symbol_is_empty() {
        let source = InMemoryPriceSource::new();
        assert!(source.fetch(&sber(), p("2020-1"), p("2020-12")).unwrap().is_empty());
    }

    #[test]
    fn test_load_from_csv() {
        let csv_data = "symbol,date,close\n\
                        micex/SBER,2020-01-31,250.5\n\
                        micex/SBER,2020-02-28T18:45:00+03:00,240.0\n\
                        nlu/922,2020-01-3,1.5\n";
        let mut source = InMemoryPriceSource::new();

        assert_eq!(source.load_from_csv(csv_data.as_bytes()).unwrap(), 3);
        assert_eq!(source.num_symbols(), 2);

        let rows = source.fetch(&sber(), p("2020-1"), p("2020-12")).unwrap();
        assert!(matches!(rows[0].observed, Observation::At(_)));
        assert!(matches!(rows[1].observed, Observation::At(_)));

        let fund = FinancialSymbol::new("nlu", "922", Currency::RUB, SecurityType::MutualFund, Granularity::Decade);
        let rows = source.fetch(&fund, p("2020-1"), p("2020-1")).unwrap();
        assert_eq!(rows[0].observed, Observation::Label("2020-01-3".to_string()));
    }
}
