//! Expense Tracker Library
//! # Overview
//!
//! This library records personal income and expense transactions in a
//! single local data file and derives totals, monthly summaries and
//! per-category expense summaries from them.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, Date, summaries, errors)
//! - [`core`] - Business logic components:
//!   - [`core::record_store`] - The ledger: ids, validation, aggregation, persistence
//!   - [`core::traits`] - The storage backend seam
//! - [`io`] - Binary data file codec, storage backends, CSV import/export, text reports
//! - [`cli`] - CLI argument parsing and command dispatch
//!
//! # Persistence
//!
//! Every successful add or delete rewrites the whole data file. The file
//! backend writes a temporary file next to the destination and renames it
//! into place, so the previous file survives an interrupted write.
//!
//! # Example
//!
//! ```
//! use expense_tracker::{Date, MemoryStorage, RecordStore, TransactionKind};
//! use rust_decimal::Decimal;
//!
//! let mut store = RecordStore::new(MemoryStorage::new(), 1000);
//! store
//!     .add_transaction(
//!         TransactionKind::Income,
//!         Date::new(15, 3, 2024).unwrap(),
//!         Decimal::new(1000, 0),
//!         "Salary",
//!         "",
//!     )
//!     .unwrap();
//! assert_eq!(store.balance(), Decimal::new(1000, 0));
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{RecordStore, Storage, DEFAULT_CAPACITY};
pub use io::{FileStorage, MemoryStorage};
pub use types::{
    validate_date, CategoryTotal, Date, LedgerError, PeriodSummary, Transaction, TransactionId,
    TransactionKind,
};
