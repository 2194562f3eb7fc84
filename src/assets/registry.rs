//! Symbol registry - `namespace/ticker` lookup

use super::symbol::FinancialSymbol;
use crate::error::{Result, YapoError};
use hashbrown::HashMap;

/// Lookup of symbol metadata by `namespace/ticker`
pub trait SymbolRegistry: Send + Sync {
    /// Symbol for an exact id, `Ok(None)` if unknown.
    ///
    /// Storage failures and unreadable entries are errors, not `None`.
    fn get(&self, name: &str) -> Result<Option<FinancialSymbol>>;

    /// Symbol for an id, failing with `SymbolNotFound`
    fn lookup(&self, name: &str) -> Result<FinancialSymbol> {
        let name = name.trim();
        self.get(name)?
            .ok_or_else(|| YapoError::SymbolNotFound(name.to_string()))
    }

    /// Batch lookup of comma-separated ids.
    ///
    /// Returns one entry per id in input order; whitespace around ids is ignored.
    fn information(&self, names: &str) -> Result<Vec<Option<FinancialSymbol>>> {
        names.split(',').map(|name| self.get(name.trim())).collect()
    }
}

/// Registry backed by a hash map
#[derive(Debug, Clone, Default)]
pub struct InMemorySymbolRegistry {
    symbols: HashMap<String, FinancialSymbol>,
}

impl InMemorySymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a symbol under its `namespace/ticker` id
    pub fn insert(&mut self, symbol: FinancialSymbol) {
        self.symbols.insert(symbol.name(), symbol);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All ids of a namespace, sorted
    pub fn namespace(&self, namespace: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .symbols
            .values()
            .filter(|s| s.namespace == namespace)
            .map(FinancialSymbol::name)
            .collect();
        names.sort();
        names
    }
}

impl FromIterator<FinancialSymbol> for InMemorySymbolRegistry {
    fn from_iter<I: IntoIterator<Item = FinancialSymbol>>(iter: I) -> Self {
        let mut registry = Self::new();
        for symbol in iter {
            registry.insert(symbol);
        }
        registry
    }
}

impl SymbolRegistry for InMemorySymbolRegistry {
    fn get(&self, name: &str) -> Result<Option<FinancialSymbol>> {
        Ok(self.symbols.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SecurityType;
    use crate::currency::Currency;
    use crate::data::frequency::Granularity;

    fn registry() -> InMemorySymbolRegistry {
        vec![
            FinancialSymbol::new("infl", "RU", Currency::RUB, SecurityType::Inflation, Granularity::Month),
            FinancialSymbol::new("infl", "EU", Currency::EUR, SecurityType::Inflation, Granularity::Month),
            FinancialSymbol::new("micex", "SBER", Currency::RUB, SecurityType::StockEtf, Granularity::Day),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup(" micex/SBER ").unwrap().ticker, "SBER");
        assert!(matches!(
            registry.lookup("micex/MCFTR_doesntexist"),
            Err(YapoError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_information_keeps_count_and_order() {
        let registry = registry();
        let infos = registry.information("infl/RU, micex/MCFTR_doesntexist, micex/SBER").unwrap();

        assert_eq!(infos.len(), 3);
        assert_eq!(infos[0].as_ref().map(|s| s.name()), Some("infl/RU".to_string()));
        assert!(infos[1].is_none());
        assert_eq!(infos[2].as_ref().map(|s| s.name()), Some("micex/SBER".to_string()));
    }

    #[test]
    fn test_information_ignores_whitespace() {
        let registry = registry();
        let a = registry.information("infl/RU, infl/EU").unwrap();
        let b = registry.information("    infl/RU    ,      infl/EU      ").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_namespace_listing() {
        assert_eq!(registry().namespace("infl"), vec!["infl/EU", "infl/RU"]);
    }
}
