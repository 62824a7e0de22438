use rust_decimal::Decimal;

/// One bar-chart row: aggregated totals for a single calendar month.
/// Derived from the transaction collection, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub month: String,
    pub expenses: Decimal,
    pub income: Decimal,
}
