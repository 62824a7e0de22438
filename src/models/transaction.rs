use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

/// A single recorded income or expense event. The whole collection is
/// serialized into the durable slot, so the field names here are the blob
/// format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the form hands to `add`/`update`. Absent or unparseable fields are
/// `None` so validation can report every violation in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub description: String,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub kind: TransactionType,
}

/// View-only pairing of a transaction with its display strings. Never
/// persisted; recomputed on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedTransaction {
    pub transaction: Transaction,
    pub formatted_amount: String,
    pub formatted_date: String,
}
