use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::transaction::{FormattedTransaction, Transaction};

/// Renders an amount as a US-dollar display string with comma grouping and
/// exactly two fractional digits, e.g. `1234.5` -> `"$1,234.50"`. Negative
/// amounts render as `-$...`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let unsigned = rounded.abs();

    let raw = format!("{unsigned:.2}");
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// Renders a date as abbreviated month, unpadded day and full year,
/// e.g. `"Jan 5, 2024"`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Attaches display strings to every transaction for the list views.
pub fn format_transactions(transactions: &[Transaction]) -> Vec<FormattedTransaction> {
    transactions
        .iter()
        .map(|transaction| FormattedTransaction {
            formatted_amount: format_currency(transaction.amount),
            formatted_date: format_date(transaction.date),
            transaction: transaction.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::TransactionType;
    use chrono::Utc;

    #[test]
    fn test_format_currency_grouping_and_padding() {
        assert_eq!(format_currency(Decimal::new(12345, 1)), "$1,234.50");
        assert_eq!(format_currency(Decimal::new(50, 0)), "$50.00");
        assert_eq!(format_currency(Decimal::new(1234567, 2)), "$12,345.67");
        assert_eq!(format_currency(Decimal::new(1000000, 0)), "$1,000,000.00");
    }

    #[test]
    fn test_format_currency_zero() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(Decimal::new(-150050, 2)), "-$1,500.50");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(Decimal::new(2005, 3)), "$2.01");
        assert_eq!(format_currency(Decimal::new(-2005, 3)), "-$2.01");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2024");

        let date = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
        assert_eq!(format_date(date), "Nov 28, 2025");
    }

    #[test]
    fn test_format_transactions_attaches_display_strings() {
        let now = Utc::now();
        let transaction = Transaction {
            id: "abc".to_string(),
            amount: Decimal::new(12345, 1),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            description: "Rent".to_string(),
            kind: TransactionType::Expense,
            created_at: now,
            updated_at: now,
        };

        let formatted = format_transactions(&[transaction.clone()]);
        assert_eq!(formatted.len(), 1);
        assert_eq!(formatted[0].formatted_amount, "$1,234.50");
        assert_eq!(formatted[0].formatted_date, "Mar 9, 2024");
        assert_eq!(formatted[0].transaction, transaction);
    }
}
