//! Streaming CSV reader for ledger imports
//!
//! Provides an iterator over import rows from a CSV file, delegating format
//! concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! CsvImportReader implements the Iterator trait, yielding
//! `Result<ImportEntry, LedgerError>` for each CSV row:
//!
//! ```no_run
//! use expense_tracker::io::csv_reader::CsvImportReader;
//! use std::path::Path;
//!
//! let reader = CsvImportReader::new(Path::new("statement.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(entry) => println!("Importing: {:?}", entry),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants and carry the line number

use crate::io::csv_format::{convert_csv_record, CsvRecord, ImportEntry};
use crate::types::LedgerError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CSV import reader
///
/// Streams rows one at a time; the file is never loaded whole.
#[derive(Debug)]
pub struct CsvImportReader<R: Read = File> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    record: StringRecord,
    done: bool,
}

impl CsvImportReader<File> {
    /// Open a CSV file for import
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be opened and `ParseError` if
    /// the header row cannot be read.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| LedgerError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvImportReader<R> {
    /// Wrap any reader producing CSV with a header row
    ///
    /// Fields are trimmed and rows may omit the trailing description column.
    pub fn from_reader(reader: R) -> Result<Self, LedgerError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(reader);
        let headers = reader.headers()?.clone();

        Ok(CsvImportReader {
            reader,
            headers,
            record: StringRecord::new(),
            done: false,
        })
    }
}

impl<R: Read> Iterator for CsvImportReader<R> {
    type Item = Result<ImportEntry, LedgerError>;

    /// Read, deserialize and convert the next row
    ///
    /// Conversion errors are tagged with the row's line number. An I/O
    /// failure ends the iteration after being reported once.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map(|pos| pos.line());
                let converted = self
                    .record
                    .deserialize::<CsvRecord>(Some(&self.headers))
                    .map_err(LedgerError::from)
                    .and_then(convert_csv_record)
                    .map_err(|e| match e {
                        LedgerError::ParseError { message, .. } => {
                            LedgerError::ParseError { line, message }
                        }
                        other => LedgerError::ParseError {
                            line,
                            message: other.to_string(),
                        },
                    });
                Some(converted)
            }
            Err(e) => {
                self.done = e.is_io_error();
                Some(Err(e.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_reads_valid_rows() {
        let file = create_temp_csv(
            "kind,date,amount,category,description\n\
             income,15/03/2024,1000,Salary,March pay\n\
             expense,20/03/2024,200.50,Food\n",
        );

        let entries: Vec<_> = CsvImportReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, TransactionKind::Income);
        assert_eq!(entries[0].description, "March pay");
        assert_eq!(entries[1].amount, Decimal::new(20050, 2));
        assert_eq!(entries[1].description, "");
    }

    #[test]
    fn test_row_errors_carry_line_numbers_and_do_not_stop_iteration() {
        let content = "kind,date,amount,category\n\
                       income,15/03/2024,1000,Salary\n\
                       income,31/02/2024,10,Broken\n\
                       expense,20/03/2024,5,Food\n";

        let results: Vec<_> = CsvImportReader::from_reader(content.as_bytes())
            .unwrap()
            .collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(LedgerError::ParseError { line: Some(3), .. })
        ));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_missing_file() {
        let result = CsvImportReader::new(Path::new("does-not-exist.csv"));
        assert!(result
            .err()
            .unwrap()
            .to_string()
            .contains("Failed to open file"));
    }
}
