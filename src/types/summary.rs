//! Aggregate views derived from the transaction list

use rust_decimal::Decimal;

/// Income and expense totals over some set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodSummary {
    pub income: Decimal,
    pub expense: Decimal,
}

impl PeriodSummary {
    /// Income minus expense; never stored
    ///
    /// Saturates at the `Decimal` bounds like the sums it is built from.
    pub fn balance(&self) -> Decimal {
        self.income.saturating_sub(self.expense)
    }
}

/// Summed expense amount for one category label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}
