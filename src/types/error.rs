//! Error types for the expense tracker
//!
//! This module defines all error types that can occur while recording,
//! persisting and importing transactions. Errors are designed to be
//! descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Validation Errors**: invalid dates, non-positive amounts, overlong text, full store
//! - **Lookup Errors**: deleting an id that does not exist
//! - **Storage Errors**: the data file cannot be read or written
//! - **Import Errors**: malformed CSV rows

use crate::types::transaction::TransactionId;
use thiserror::Error;

/// Main error type for the ledger
///
/// Validation variants are always raised before any state is touched.
/// `Unsaved` is the one variant reported *after* a mutation was applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Calendar date is malformed or outside the supported range
    #[error("Invalid date '{input}'")]
    InvalidDate {
        /// The date as the caller supplied it
        input: String,
    },

    /// Amount is zero, negative or not a number
    #[error("Invalid amount '{amount}': must be a number greater than zero")]
    InvalidAmount {
        /// The rejected amount
        amount: String,
    },

    /// No transaction carries the requested id
    #[error("Transaction {id} not found")]
    NotFound {
        /// The id that was looked up
        id: TransactionId,
    },

    /// The storage backend could not be read or written
    #[error("Storage unavailable at {location}: {message}")]
    StorageUnavailable {
        /// Where the store lives (file path or backend name)
        location: String,
        /// Underlying failure
        message: String,
    },

    /// A mutation was applied in memory but could not be flushed
    ///
    /// The change is visible for the rest of the session but may not
    /// survive a restart.
    #[error("{operation} of transaction {id} was applied but not saved: {message}")]
    Unsaved {
        /// Operation that was applied ("add" or "delete")
        operation: String,
        /// Id of the affected transaction
        id: TransactionId,
        /// Storage failure description
        message: String,
    },

    /// The store already holds the maximum number of transactions
    #[error("Store is full: capacity of {capacity} transactions reached")]
    CapacityExceeded {
        /// Configured capacity
        capacity: usize,
    },

    /// A text field failed its bounds check
    #[error("Invalid {field}: {reason}")]
    InvalidText {
        /// Field name ("category" or "description")
        field: String,
        /// Why it was rejected
        reason: String,
    },

    /// A binary record could not be decoded
    #[error("Corrupt record at byte {offset}: {message}")]
    CorruptRecord {
        /// Byte offset of the record within the data file
        offset: usize,
        /// Description of the problem
        message: String,
    },

    /// CSV parsing error during import
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// I/O error outside the storage backend (output stream, import file)
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidDate error
    pub fn invalid_date(input: impl Into<String>) -> Self {
        LedgerError::InvalidDate {
            input: input.into(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: impl ToString) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(id: TransactionId) -> Self {
        LedgerError::NotFound { id }
    }

    /// Create a StorageUnavailable error
    pub fn storage_unavailable(location: &str, message: impl ToString) -> Self {
        LedgerError::StorageUnavailable {
            location: location.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an Unsaved error from the storage failure that caused it
    pub fn unsaved(operation: &str, id: TransactionId, cause: &LedgerError) -> Self {
        LedgerError::Unsaved {
            operation: operation.to_string(),
            id,
            message: cause.to_string(),
        }
    }

    /// Create an InvalidText error
    pub fn invalid_text(field: &str, reason: impl Into<String>) -> Self {
        LedgerError::InvalidText {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a CorruptRecord error
    pub fn corrupt_record(offset: usize, message: impl Into<String>) -> Self {
        LedgerError::CorruptRecord {
            offset,
            message: message.into(),
        }
    }

    /// Whether the error was raised before any state changed
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidDate { .. }
                | LedgerError::InvalidAmount { .. }
                | LedgerError::InvalidText { .. }
                | LedgerError::CapacityExceeded { .. }
        )
    }
}
