use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::finance::ident;
use crate::models::transaction::{Transaction, TransactionType};

/// The fixed 8-record seed set used when the durable slot is empty or
/// unreadable. Dates are derived from `today` so the records land inside
/// the chart window; ids are freshly generated.
pub fn sample_transactions(today: NaiveDate) -> Vec<Transaction> {
    let last_week = today - Duration::days(7);
    let last_month = months_back(today, 1);
    let two_months_ago = months_back(today, 2);

    let entries: [(i64, NaiveDate, &str, TransactionType, NaiveDate); 8] = [
        (2000, first_of(today), "Salary", TransactionType::Income, today),
        (500, last_week, "Rent", TransactionType::Expense, last_week),
        (50, today, "Groceries", TransactionType::Expense, today),
        (1800, first_of(last_month), "Salary", TransactionType::Income, last_month),
        (100, last_month, "Utilities", TransactionType::Expense, last_month),
        (30, last_month, "Coffee Shop", TransactionType::Expense, last_month),
        (1800, first_of(two_months_ago), "Salary", TransactionType::Income, two_months_ago),
        (200, two_months_ago, "Electronics", TransactionType::Expense, two_months_ago),
    ];

    entries
        .into_iter()
        .map(|(amount, date, description, kind, recorded)| {
            let stamp = midnight(recorded);
            Transaction {
                id: ident::generate(),
                amount: Decimal::from(amount),
                date,
                description: description.to_string(),
                kind,
                created_at: stamp,
                updated_at: stamp,
            }
        })
        .collect()
}

fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

fn first_of(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::aggregate;

    #[test]
    fn test_sample_set_has_eight_records() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let samples = sample_transactions(today);

        assert_eq!(samples.len(), 8);
        assert!(samples.iter().all(|t| t.amount > Decimal::ZERO));
        assert!(samples.iter().all(|t| !t.description.is_empty()));
    }

    #[test]
    fn test_sample_descriptions_are_deterministic() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let descriptions: Vec<String> = sample_transactions(today)
            .into_iter()
            .map(|t| t.description)
            .collect();

        assert_eq!(
            descriptions,
            vec![
                "Salary",
                "Rent",
                "Groceries",
                "Salary",
                "Utilities",
                "Coffee Shop",
                "Salary",
                "Electronics"
            ]
        );
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let samples = sample_transactions(today);
        let mut ids: Vec<&str> = samples.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_salaries_fall_on_the_first_of_their_month() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let samples = sample_transactions(today);

        for salary in samples.iter().filter(|t| t.description == "Salary") {
            assert_eq!(salary.date.day(), 1);
        }
    }

    #[test]
    fn test_sample_set_fills_the_chart_window() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let samples = sample_transactions(today);
        let buckets = aggregate::monthly_buckets(&samples, today);

        // All eight records land in the trailing three months of the window.
        let bucketed: Decimal = buckets.iter().map(|b| b.expenses + b.income).sum();
        let total = aggregate::total_expenses(&samples) + aggregate::total_income(&samples);
        assert_eq!(bucketed, total);
    }

    #[test]
    fn test_month_stepping_clamps_end_of_month() {
        let end_of_may = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        assert_eq!(
            months_back(end_of_may, 1),
            NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()
        );
    }
}
