//! Core business logic module
//!
//! This module contains the record store and the storage seam it depends on:
//! - `traits` - Storage backend abstraction
//! - `record_store` - The ledger aggregate root

pub mod record_store;
pub mod traits;

pub use record_store::{RecordStore, DEFAULT_CAPACITY};
pub use traits::Storage;
