use std::io;

/// A single failed validation check. `TransactionInput` validation runs
/// every check, so an `Error::Validation` can carry several of these at
/// once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("description is required")]
    DescriptionRequired,

    #[error("amount must be a positive number")]
    AmountNotPositive,

    #[error("date is required")]
    DateRequired,
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The submitted transaction details failed one or more validation
    /// checks. Every violation is listed, not just the first.
    #[error("invalid transaction: {}", .0.iter().map(|issue| issue.to_string()).collect::<Vec<_>>().join("; "))]
    Validation(Vec<ValidationIssue>),

    /// An update referred to a transaction id that is not in the store.
    #[error("transaction with id {0} not found")]
    NotFound(String),

    /// An entry line had the wrong number of comma-separated fields.
    #[error("expected {expected} fields separated by commas but got {got}")]
    FieldCount { expected: usize, got: usize },

    /// The transaction type field was neither "income" nor "expense".
    #[error("invalid transaction type {0:?}, use 'income' or 'expense'")]
    UnknownType(String),

    /// A non-empty date field did not parse as YYYY-MM-DD.
    #[error("invalid date {0:?}, please use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The stored blob could not be encoded or decoded. On load this is
    /// recovered with sample data rather than surfaced to the user.
    #[error("could not read or write stored transactions: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
