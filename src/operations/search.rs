use crate::models::transaction::{Transaction, TransactionType};

/// Filters the collection the way the list view does: a case-insensitive
/// substring match on the description combined with an optional type
/// filter. An empty term matches everything.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    term: &str,
    kind: Option<TransactionType>,
) -> Vec<&'a Transaction> {
    let needle = term.to_lowercase();
    transactions
        .iter()
        .filter(|transaction| {
            transaction.description.to_lowercase().contains(&needle)
                && kind.is_none_or(|k| transaction.kind == k)
        })
        .collect()
}

/// Splits a search prompt into the term and an optional trailing type
/// qualifier, so "coffee, expense" narrows to expenses while a comma that
/// is just part of the term ("a, b") stays in it.
pub fn parse_search_query(raw: &str) -> (String, Option<TransactionType>) {
    if let Some((term, qualifier)) = raw.rsplit_once(',') {
        let kind = match qualifier.trim().to_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        };
        if kind.is_some() {
            return (term.trim().to_string(), kind);
        }
    }
    (raw.trim().to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn create_test_transaction(id: &str, description: &str, kind: TransactionType) -> Transaction {
        let now = Utc::now();
        Transaction {
            id: id.to_string(),
            amount: Decimal::new(10050, 2),
            date: NaiveDate::from_ymd_opt(2025, 11, 9).expect("Invalid date"),
            description: description.to_string(),
            kind,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_filter_by_term_found() {
        let transactions = vec![
            create_test_transaction("1", "Coffee Shop", TransactionType::Expense),
            create_test_transaction("2", "Salary", TransactionType::Income),
            create_test_transaction("3", "Coffee beans", TransactionType::Expense),
        ];

        let result = filter_transactions(&transactions, "coffee", None);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "1");
        assert_eq!(result[1].id, "3");
    }

    #[test]
    fn test_filter_by_term_not_found() {
        let transactions = vec![
            create_test_transaction("1", "Rent", TransactionType::Expense),
            create_test_transaction("2", "Salary", TransactionType::Income),
        ];

        let result = filter_transactions(&transactions, "groceries", None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let transactions = vec![
            create_test_transaction("1", "Utilities", TransactionType::Expense),
            create_test_transaction("2", "utilities refund", TransactionType::Income),
        ];

        let result = filter_transactions(&transactions, "UTILITIES", None);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_filter_by_type() {
        let transactions = vec![
            create_test_transaction("1", "Rent", TransactionType::Expense),
            create_test_transaction("2", "Salary", TransactionType::Income),
            create_test_transaction("3", "Groceries", TransactionType::Expense),
        ];

        let result = filter_transactions(&transactions, "", Some(TransactionType::Expense));
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|t| t.kind == TransactionType::Expense));
    }

    #[test]
    fn test_filter_combines_term_and_type() {
        let transactions = vec![
            create_test_transaction("1", "Coffee Shop", TransactionType::Expense),
            create_test_transaction("2", "Coffee stipend", TransactionType::Income),
        ];

        let result = filter_transactions(&transactions, "coffee", Some(TransactionType::Income));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "2");
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let transactions = vec![
            create_test_transaction("1", "Rent", TransactionType::Expense),
            create_test_transaction("2", "Salary", TransactionType::Income),
        ];

        let result = filter_transactions(&transactions, "", None);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_parse_query_with_expense_qualifier() {
        let (term, kind) = parse_search_query("coffee, expense");
        assert_eq!(term, "coffee");
        assert_eq!(kind, Some(TransactionType::Expense));
    }

    #[test]
    fn test_parse_query_with_income_qualifier_ignores_case() {
        let (term, kind) = parse_search_query("salary,INCOME");
        assert_eq!(term, "salary");
        assert_eq!(kind, Some(TransactionType::Income));
    }

    #[test]
    fn test_parse_query_without_qualifier() {
        let (term, kind) = parse_search_query("groceries");
        assert_eq!(term, "groceries");
        assert_eq!(kind, None);
    }

    #[test]
    fn test_parse_query_keeps_commas_that_are_not_qualifiers() {
        let (term, kind) = parse_search_query("rent, utilities");
        assert_eq!(term, "rent, utilities");
        assert_eq!(kind, None);
    }

    #[test]
    fn test_parse_query_with_bare_qualifier_filters_everything() {
        let (term, kind) = parse_search_query(", income");
        assert_eq!(term, "");
        assert_eq!(kind, Some(TransactionType::Income));
    }
}
