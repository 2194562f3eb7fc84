//! Error types for rusty_yapo

use thiserror::Error;

/// Main error type for rusty_yapo
#[derive(Error, Debug)]
pub enum YapoError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported granularity: {0}")]
    UnsupportedGranularity(String),

    #[error("Currency pair unavailable: {from} -> {to}")]
    CurrencyPairUnavailable { from: String, to: String },

    #[error("Empty window: {0}")]
    EmptyWindow(String),

    #[error("Undefined growth rate: {0}")]
    UndefinedGrowthRate(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for rusty_yapo operations
pub type Result<T> = std::result::Result<T, YapoError>;
