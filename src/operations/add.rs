use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::Error;
use crate::models::transaction::{TransactionInput, TransactionType};

/// Parses a comma-separated entry line in the format
/// `date(YYYY-MM-DD), description, amount, type(income/expense)` into a
/// `TransactionInput`. An empty date or an empty/non-numeric amount becomes
/// `None` so the store's validation can report every violation together; a
/// date that is present but malformed fails here, matching the prompt.
pub fn parse_entry(raw: &str) -> Result<TransactionInput, Error> {
    let parts: Vec<&str> = raw.split(',').map(|s| s.trim()).collect();
    if parts.len() != 4 {
        return Err(Error::FieldCount {
            expected: 4,
            got: parts.len(),
        });
    }

    let date = match parts[0] {
        "" => None,
        text => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => return Err(Error::InvalidDate(text.to_string())),
        },
    };

    let description = parts[1].to_string();

    let amount = parts[2].parse::<Decimal>().ok();

    let kind = match parts[3].to_lowercase().as_str() {
        "income" => TransactionType::Income,
        "expense" => TransactionType::Expense,
        other => return Err(Error::UnknownType(other.to_string())),
    };

    Ok(TransactionInput {
        description,
        amount,
        date,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_success() {
        let input = parse_entry("2025-06-10, Groceries, 49.99, expense").unwrap();

        assert_eq!(input.date, NaiveDate::from_ymd_opt(2025, 6, 10));
        assert_eq!(input.description, "Groceries");
        assert_eq!(input.amount, Some(Decimal::new(4999, 2)));
        assert_eq!(input.kind, TransactionType::Expense);
    }

    #[test]
    fn test_parse_entry_income_case_insensitive() {
        let input = parse_entry("2025-06-01, Salary, 2000, INCOME").unwrap();
        assert_eq!(input.kind, TransactionType::Income);
    }

    #[test]
    fn test_parse_entry_wrong_field_count() {
        let result = parse_entry("2025-06-10, Groceries, 49.99");
        assert!(matches!(
            result,
            Err(Error::FieldCount {
                expected: 4,
                got: 3
            })
        ));
    }

    #[test]
    fn test_parse_entry_malformed_date() {
        let result = parse_entry("10-06-2025, Groceries, 49.99, expense");
        assert!(matches!(result, Err(Error::InvalidDate(_))));
    }

    #[test]
    fn test_parse_entry_empty_date_left_for_validation() {
        let input = parse_entry(", Groceries, 49.99, expense").unwrap();
        assert_eq!(input.date, None);
    }

    #[test]
    fn test_parse_entry_non_numeric_amount_left_for_validation() {
        let input = parse_entry("2025-06-10, Groceries, lots, expense").unwrap();
        assert_eq!(input.amount, None);
    }

    #[test]
    fn test_parse_entry_unknown_type() {
        let result = parse_entry("2025-06-10, Groceries, 49.99, transfer");
        assert!(matches!(result, Err(Error::UnknownType(_))));
    }
}
