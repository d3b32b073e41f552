//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `date`: Validated calendar dates
//! - `transaction`: Transaction entity, kinds and identifiers
//! - `summary`: Aggregate views (period and category totals)
//! - `error`: Error types for the ledger

pub mod date;
pub mod error;
pub mod summary;
pub mod transaction;

pub use date::{validate_date, Date, MAX_YEAR, MIN_YEAR};
pub use error::LedgerError;
pub use summary::{CategoryTotal, PeriodSummary};
pub use transaction::{
    normalize_text, round_amount, Transaction, TransactionId, TransactionKind, AMOUNT_SCALE,
    MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN,
};
