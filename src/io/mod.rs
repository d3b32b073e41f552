//! I/O module
//!
//! Handles everything that turns ledger data into bytes or text and back.
//!
//! # Components
//!
//! - `binary_format` - Fixed-layout data file encoding and lenient decoding
//! - `storage` - File and in-memory storage backends
//! - `csv_format` - CSV import record conversion and ledger export
//! - `csv_reader` - Streaming CSV import reader with iterator interface
//! - `report` - Plain-text tables and summaries

pub mod binary_format;
pub mod csv_format;
pub mod csv_reader;
pub mod report;
pub mod storage;

pub use csv_format::{convert_csv_record, write_transactions_csv, CsvRecord, ImportEntry};
pub use csv_reader::CsvImportReader;
pub use storage::{FileStorage, MemoryStorage};
