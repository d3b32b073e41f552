//! CSV format handling for transaction import and export
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserializing import rows
//! - Conversion from CSV records to validated import entries
//! - Ledger export serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{round_amount, Date, LedgerError, Transaction, TransactionKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for import
///
/// Matches the import format with columns: kind, date, amount, category, description.
/// The description column may be omitted.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub kind: String,
    pub date: String,
    pub amount: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One import row after parsing, ready to be added to a store
#[derive(Debug, Clone, PartialEq)]
pub struct ImportEntry {
    pub kind: TransactionKind,
    pub date: Date,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}

/// Export row, one per transaction
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: u32,
    date: String,
    kind: TransactionKind,
    amount: String,
    category: &'a str,
    description: &'a str,
}

/// Convert a CsvRecord to an ImportEntry
///
/// This function:
/// - Parses the kind string case-insensitively
/// - Parses the date in any of the accepted date formats
/// - Parses the amount into a Decimal
///
/// Amount positivity and text bounds are left to the store, which is the
/// single place those rules live.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<ImportEntry, LedgerError> {
    let kind = TransactionKind::from_str(&csv_record.kind).map_err(|message| {
        LedgerError::ParseError {
            line: None,
            message,
        }
    })?;

    let date = Date::from_str(&csv_record.date)?;

    let amount = Decimal::from_str(csv_record.amount.trim())
        .map_err(|_| LedgerError::invalid_amount(&csv_record.amount))?;

    Ok(ImportEntry {
        kind,
        date,
        amount,
        category: csv_record.category,
        description: csv_record.description.unwrap_or_default(),
    })
}

/// Write transactions in CSV format
///
/// Columns: id, date, kind, amount, category, description. Rows keep
/// ledger order and amounts are written with two decimals.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    for tx in transactions {
        writer.serialize(ExportRow {
            id: tx.id,
            date: tx.date.to_string(),
            kind: tx.kind,
            amount: format!("{:.2}", round_amount(tx.amount)),
            category: &tx.category,
            description: &tx.description,
        })?;
    }

    // The header comes from the first serialized row; write it explicitly
    // for an empty ledger so the output is still a valid CSV document.
    if transactions.is_empty() {
        writer.write_record(["id", "date", "kind", "amount", "category", "description"])?;
    }

    writer.flush()?;
    Ok(())
}
