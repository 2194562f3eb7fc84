//! Symbol metadata database with SQLite

use super::registry::SymbolRegistry;
use super::symbol::{FinancialSymbol, SecurityType};
use crate::error::{Result, YapoError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;

const SELECT_COLUMNS: &str = "SELECT namespace, ticker, isin, short_name, long_name, exchange, \
     currency, security_type, granularity, adjusted_close FROM symbols";

/// Symbol registry persisted in SQLite
pub struct SymbolDb {
    conn: Mutex<Connection>,
}

impl SymbolDb {
    /// Create or open database at path
    pub fn new(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .map_err(|e| YapoError::DatabaseError(format!("Failed to open database: {}", e)))?;
        Self::with_connection(conn)
    }

    /// Create in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            YapoError::DatabaseError(format!("Failed to create in-memory database: {}", e))
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS symbols (
                namespace TEXT NOT NULL,
                ticker TEXT NOT NULL,
                isin TEXT,
                short_name TEXT,
                long_name TEXT,
                exchange TEXT,
                currency TEXT NOT NULL,
                security_type TEXT NOT NULL,
                granularity TEXT NOT NULL,
                adjusted_close INTEGER NOT NULL,
                PRIMARY KEY (namespace, ticker)
            )",
            [],
        )
        .map_err(|e| YapoError::DatabaseError(format!("Failed to create symbols table: {}", e)))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| YapoError::DatabaseError("symbol database lock poisoned".to_string()))
    }

    /// Insert or replace a symbol
    pub fn insert_symbol(&self, symbol: &FinancialSymbol) -> Result<()> {
        self.connection()?
            .execute(
                "INSERT OR REPLACE INTO symbols (namespace, ticker, isin, short_name, long_name, exchange,
                     currency, security_type, granularity, adjusted_close)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    &symbol.namespace,
                    &symbol.ticker,
                    &symbol.isin,
                    &symbol.short_name,
                    &symbol.long_name,
                    &symbol.exchange,
                    symbol.currency.code(),
                    symbol.security_type.as_str(),
                    symbol.granularity.as_str(),
                    symbol.adjusted_close,
                ],
            )
            .map_err(|e| YapoError::DatabaseError(format!("Failed to insert symbol: {}", e)))?;
        Ok(())
    }

    /// Get symbol by `namespace/ticker`
    pub fn get_symbol(&self, name: &str) -> Result<Option<FinancialSymbol>> {
        let (namespace, ticker) = match name.split_once('/') {
            Some(parts) => parts,
            None => return Ok(None),
        };

        let row = self
            .connection()?
            .query_row(
                &format!("{} WHERE namespace = ?1 AND ticker = ?2", SELECT_COLUMNS),
                params![namespace, ticker],
                read_row,
            )
            .optional()
            .map_err(|e| YapoError::DatabaseError(format!("Failed to get symbol: {}", e)))?;

        row.map(SymbolRow::into_symbol).transpose()
    }

    /// Number of stored symbols
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .connection()?
            .query_row("SELECT COUNT(*) FROM symbols", [], |row| row.get(0))
            .map_err(|e| YapoError::DatabaseError(format!("Failed to count symbols: {}", e)))?;
        Ok(count as usize)
    }
}

impl SymbolRegistry for SymbolDb {
    fn get(&self, name: &str) -> Result<Option<FinancialSymbol>> {
        self.get_symbol(name).map_err(|e| {
            log::warn!("Symbol lookup for {} failed: {}", name, e);
            e
        })
    }
}

/// Raw text columns, parsed outside of the rusqlite callback
struct SymbolRow {
    namespace: String,
    ticker: String,
    isin: Option<String>,
    short_name: Option<String>,
    long_name: Option<String>,
    exchange: Option<String>,
    currency: String,
    security_type: String,
    granularity: String,
    adjusted_close: bool,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<SymbolRow> {
    Ok(SymbolRow {
        namespace: row.get(0)?,
        ticker: row.get(1)?,
        isin: row.get(2)?,
        short_name: row.get(3)?,
        long_name: row.get(4)?,
        exchange: row.get(5)?,
        currency: row.get(6)?,
        security_type: row.get(7)?,
        granularity: row.get(8)?,
        adjusted_close: row.get(9)?,
    })
}

impl SymbolRow {
    fn into_symbol(self) -> Result<FinancialSymbol> {
        Ok(FinancialSymbol {
            namespace: self.namespace,
            ticker: self.ticker,
            isin: self.isin,
            short_name: self.short_name,
            long_name: self.long_name,
            exchange: self.exchange,
            currency: self.currency.parse()?,
            security_type: self.security_type.parse::<SecurityType>()?,
            granularity: self.granularity.parse()?,
            adjusted_close: self.adjusted_close,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use crate::data::frequency::Granularity;

    #[test]
    fn test_symbol_db_creation() {
        let db = SymbolDb::new_in_memory().unwrap();
        assert_eq!(db.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_get_symbol() {
        let db = SymbolDb::new_in_memory().unwrap();
        let usd = FinancialSymbol::new(
            "cbr",
            "USD",
            Currency::USD,
            SecurityType::Currency,
            Granularity::Day,
        )
        .with_names("Доллар США", None)
        .with_adjusted_close(true);

        db.insert_symbol(&usd).unwrap();
        db.insert_symbol(&usd).unwrap();
        assert_eq!(db.count().unwrap(), 1);

        let loaded = db.get_symbol("cbr/USD").unwrap().unwrap();
        assert_eq!(loaded, usd);
        assert!(loaded.isin.is_none());
        assert!(loaded.long_name.is_none());
    }

    #[test]
    fn test_registry_lookup() {
        let db = SymbolDb::new_in_memory().unwrap();
        db.insert_symbol(&FinancialSymbol::new(
            "infl",
            "RU",
            Currency::RUB,
            SecurityType::Inflation,
            Granularity::Month,
        ))
        .unwrap();

        let infos = db.information("infl/RU, infl/XX, garbage").unwrap();
        assert_eq!(infos.len(), 3);
        assert!(infos[0].is_some());
        assert!(infos[1].is_none());
        assert!(infos[2].is_none());
    }

    fn insert_raw(db: &SymbolDb, currency: &str, granularity: &str) {
        db.connection()
            .unwrap()
            .execute(
                "INSERT INTO symbols (namespace, ticker, currency, security_type, granularity, adjusted_close)
                 VALUES ('micex', 'SBER', ?1, 'stock_etf', ?2, 0)",
                params![currency, granularity],
            )
            .unwrap();
    }

    #[test]
    fn test_unreadable_row_is_an_error() {
        let db = SymbolDb::new_in_memory().unwrap();
        insert_raw(&db, "XXX", "day");

        assert!(matches!(db.get_symbol("micex/SBER"), Err(YapoError::ParseError(_))));
        assert!(matches!(db.lookup("micex/SBER"), Err(YapoError::ParseError(_))));
        assert!(matches!(
            db.information("micex/SBER, micex/GAZP"),
            Err(YapoError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_granularity_reaches_caller() {
        let db = SymbolDb::new_in_memory().unwrap();
        insert_raw(&db, "RUB", "week");

        match db.lookup("micex/SBER") {
            Err(YapoError::UnsupportedGranularity(tag)) => assert_eq!(tag, "week"),
            other => panic!("expected UnsupportedGranularity, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_symbol_is_not_found() {
        let db = SymbolDb::new_in_memory().unwrap();
        assert!(matches!(db.lookup("micex/SBER"), Err(YapoError::SymbolNotFound(_))));
    }

    #[test]
    fn test_open_failure_is_database_error() {
        let result = SymbolDb::new(Path::new("/nonexistent/dir/symbols.db"));
        assert!(matches!(result, Err(YapoError::DatabaseError(_))));
    }
}
