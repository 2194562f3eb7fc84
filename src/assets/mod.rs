//! Symbol metadata and lookup

pub mod registry;
pub mod symbol;
#[cfg(feature = "rusqlite-support")]
pub mod symbol_db;

pub use registry::{InMemorySymbolRegistry, SymbolRegistry};
pub use symbol::{FinancialSymbol, SecurityType};
#[cfg(feature = "rusqlite-support")]
pub use symbol_db::SymbolDb;
