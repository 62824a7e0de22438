use rust_decimal::Decimal;

use crate::finance::aggregate;
use crate::finance::format::format_currency;
use crate::models::transaction::Transaction;

/// Builds the three-line totals overview shown by the `summary` command:
/// income, expenses and the net balance with a positive/negative marker.
pub fn render_summary(transactions: &[Transaction]) -> String {
    let income = aggregate::total_income(transactions);
    let expenses = aggregate::total_expenses(transactions);
    let balance = aggregate::net_balance(transactions);
    let standing = if balance >= Decimal::ZERO {
        "positive"
    } else {
        "negative"
    };

    format!(
        "Total Income:   {}\nTotal Expenses: {}\nNet Balance:    {} ({})",
        format_currency(income),
        format_currency(expenses),
        format_currency(balance),
        standing
    )
}
