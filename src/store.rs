use chrono::{Local, NaiveDate, Utc};
use log::{debug, info, warn};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::db::repository;
use crate::error::{Error, ValidationIssue};
use crate::finance::{ident, sample};
use crate::models::transaction::{Transaction, TransactionInput};

/// Owns the authoritative in-memory transaction collection and the
/// connection to the durable slot. Every successful mutation is written
/// back to the slot before the method returns, so the persisted view is
/// always consistent with memory.
pub struct TransactionStore {
    conn: Connection,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Loads the persisted collection. A missing slot or an unreadable
    /// blob is recovered with the fixed sample set rather than surfaced as
    /// an error; database failures still propagate.
    pub fn open(conn: Connection) -> Result<Self, Error> {
        let transactions = match repository::load_transactions(&conn) {
            Ok(Some(transactions)) => {
                debug!("loaded {} transactions from the store", transactions.len());
                transactions
            }
            Ok(None) => {
                info!("no saved transactions, seeding sample data");
                sample::sample_transactions(Local::now().date_naive())
            }
            Err(Error::Serde(e)) => {
                warn!("stored transactions are unreadable ({e}), seeding sample data");
                sample::sample_transactions(Local::now().date_naive())
            }
            Err(e) => return Err(e),
        };

        Ok(Self { conn, transactions })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Validates the input, assigns a fresh id and record timestamps,
    /// appends the transaction and persists the collection.
    pub fn add(&mut self, input: TransactionInput) -> Result<Transaction, Error> {
        let (description, amount, date) = validate_input(&input)?;

        let now = Utc::now();
        let transaction = Transaction {
            id: ident::generate(),
            amount,
            date,
            description,
            kind: input.kind,
            created_at: now,
            updated_at: now,
        };

        self.transactions.push(transaction.clone());
        self.persist()?;
        debug!("added transaction {}", transaction.id);
        Ok(transaction)
    }

    /// Replaces the fields of the transaction with the given id. The id
    /// and `created_at` are preserved, `updated_at` is refreshed. Fails
    /// with `NotFound` when the id is not in the store.
    pub fn update(&mut self, id: &str, input: TransactionInput) -> Result<Transaction, Error> {
        let (description, amount, date) = validate_input(&input)?;

        let position = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let transaction = &mut self.transactions[position];
        transaction.description = description;
        transaction.amount = amount;
        transaction.date = date;
        transaction.kind = input.kind;
        transaction.updated_at = Utc::now();
        let updated = transaction.clone();

        self.persist()?;
        debug!("updated transaction {id}");
        Ok(updated)
    }

    /// Removes the transaction with the given id. Deleting an id that is
    /// not in the store is a no-op, and a non-mutation is not persisted.
    pub fn delete(&mut self, id: &str) -> Result<(), Error> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);

        if self.transactions.len() == before {
            debug!("delete of unknown transaction {id} ignored");
            return Ok(());
        }

        self.persist()?;
        debug!("deleted transaction {id}");
        Ok(())
    }

    fn persist(&self) -> Result<(), Error> {
        repository::save_transactions(&self.conn, &self.transactions)
    }
}

/// Runs every validation check and reports all violations together. On
/// success, hands back the trimmed description and the now-known-present
/// amount and date.
fn validate_input(input: &TransactionInput) -> Result<(String, Decimal, NaiveDate), Error> {
    let mut issues = Vec::new();

    let description = input.description.trim();
    if description.is_empty() {
        issues.push(ValidationIssue::DescriptionRequired);
    }

    let amount = match input.amount {
        Some(amount) if amount > Decimal::ZERO => Some(amount),
        _ => {
            issues.push(ValidationIssue::AmountNotPositive);
            None
        }
    };

    let date = match input.date {
        Some(date) => Some(date),
        None => {
            issues.push(ValidationIssue::DateRequired);
            None
        }
    };

    match (amount, date) {
        (Some(amount), Some(date)) if issues.is_empty() => {
            Ok((description.to_string(), amount, date))
        }
        _ => Err(Error::Validation(issues)),
    }
}
