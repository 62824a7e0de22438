use log::debug;
use rusqlite::{Connection, OptionalExtension};

use crate::error::Error;
use crate::models::transaction::Transaction;

/// The single durable slot holding the serialized transaction collection.
const STORE_KEY: &str = "transactions";

/// Serializes the whole collection and upserts it under the fixed key.
pub fn save_transactions(conn: &Connection, transactions: &[Transaction]) -> Result<(), Error> {
    let blob = serde_json::to_string(transactions)?;
    conn.execute(
        "INSERT INTO store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        rusqlite::params![STORE_KEY, blob],
    )?;
    debug!("persisted {} transactions", transactions.len());
    Ok(())
}

/// Reads the slot back. `Ok(None)` when no blob has been written yet; a
/// blob that does not parse surfaces as `Error::Serde` so the caller can
/// decide how to recover.
pub fn load_transactions(conn: &Connection) -> Result<Option<Vec<Transaction>>, Error> {
    let blob: Option<String> = conn
        .query_row("SELECT value FROM store WHERE key = ?1", [STORE_KEY], |row| row.get(0))
        .optional()?;

    match blob {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
pub fn overwrite_blob(conn: &Connection, raw: &str) -> Result<(), Error> {
    conn.execute(
        "INSERT INTO store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        rusqlite::params![STORE_KEY, raw],
    )?;
    Ok(())
}
