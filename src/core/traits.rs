//! Core traits for the record store
//!
//! The store only needs a place to read and write one byte blob. Keeping
//! that behind a trait lets the same store run against a file on disk or an
//! in-memory buffer.

use crate::types::LedgerError;

/// Byte-blob persistence backend
pub trait Storage {
    /// Read the whole stored blob
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Replace the whole stored blob
    fn write(&mut self, bytes: &[u8]) -> Result<(), LedgerError>;

    /// Human-readable location for logs and error messages
    fn location(&self) -> String;
}
