//! Base currency rate trait

use crate::currency::Currency;
use crate::data::series::MonthlySeries;
use crate::error::Result;

/// Registry of monthly exchange rates
pub trait CurrencyRateRegistry: Send + Sync {
    /// Monthly multipliers such that `to_amount = from_amount * rate`.
    ///
    /// Fails with `CurrencyPairUnavailable` when no conversion path exists.
    fn rates(&self, from: Currency, to: Currency) -> Result<MonthlySeries>;

    /// Check if a conversion path exists
    fn has_pair(&self, from: Currency, to: Currency) -> bool {
        self.rates(from, to).is_ok()
    }
}
