use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::monthly::MonthlyBucket;
use crate::models::transaction::{Transaction, TransactionType};

const WINDOW_MONTHS: i32 = 6;

/// Sum of all expense amounts. Empty collection sums to zero.
pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Expense)
        .fold(Decimal::ZERO, |total, transaction| total + transaction.amount)
}

/// Sum of all income amounts. Empty collection sums to zero.
pub fn total_income(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Income)
        .fold(Decimal::ZERO, |total, transaction| total + transaction.amount)
}

/// Income minus expenses. May be negative.
pub fn net_balance(transactions: &[Transaction]) -> Decimal {
    total_income(transactions) - total_expenses(transactions)
}

/// Returns the collection sorted by date, newest first. The sort is stable:
/// transactions on the same date keep their input order.
pub fn sort_by_date_desc(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Buckets transactions into the trailing 6-month window ending at `today`'s
/// month, oldest first. Always returns exactly 6 buckets; months with no
/// transactions stay at zero and transactions outside the window are
/// silently dropped. The window is pure calendar arithmetic keyed on
/// `(year, month)`, so a future-dated transaction inside the window still
/// counts.
pub fn monthly_buckets(transactions: &[Transaction], today: NaiveDate) -> Vec<MonthlyBucket> {
    // (year, month) keys, oldest first
    let mut keys = Vec::with_capacity(WINDOW_MONTHS as usize);
    for back in (0..WINDOW_MONTHS).rev() {
        let months = today.year() * 12 + today.month0() as i32 - back;
        let year = months.div_euclid(12);
        let month = months.rem_euclid(12) as u32 + 1;
        keys.push((year, month));
    }

    let mut buckets: Vec<MonthlyBucket> = keys
        .iter()
        .map(|&(_, month)| MonthlyBucket {
            month: month_label(month).to_string(),
            expenses: Decimal::ZERO,
            income: Decimal::ZERO,
        })
        .collect();

    for transaction in transactions {
        let key = (transaction.date.year(), transaction.date.month());
        if let Some(position) = keys.iter().position(|&k| k == key) {
            match transaction.kind {
                TransactionType::Expense => buckets[position].expenses += transaction.amount,
                TransactionType::Income => buckets[position].income += transaction.amount,
            }
        }
    }

    buckets
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}
