// Ledger error hierarchy
// Validation failures are raised before any write reaches the store.

use thiserror::Error;

/// Errors produced by the ledger core
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Rejected input: empty description, non-positive amount, bad date or label
    #[error("Validation error: {0}")]
    Validation(String),

    /// SQLite failures
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A persisted row that cannot be decoded into an entry
    #[error("Corrupt row {id} in table '{table}': {reason}")]
    CorruptRow {
        table: &'static str,
        id: i64,
        reason: String,
    },

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}

/// Result alias used throughout the library
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = LedgerError::validation("amount must be positive");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: amount must be positive");
    }

    #[test]
    fn test_database_error_is_not_validation() {
        let err: LedgerError = rusqlite::Error::InvalidQuery.into();
        assert!(!err.is_validation());
        assert!(err.to_string().starts_with("Database error"));
    }
}
