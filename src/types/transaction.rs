//! Transaction-related types for the expense tracker
//!
//! This module defines the transaction kinds, the stored transaction entity
//! and the text bounds applied to its free-form fields.

use crate::types::date::Date;
use crate::types::error::LedgerError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction identifier
///
/// Assigned by the store starting at 1 and never reused.
pub type TransactionId = u32;

/// Maximum size of a category label, in UTF-8 bytes
pub const MAX_CATEGORY_LEN: usize = 30;

/// Maximum size of a description, in UTF-8 bytes
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Decimal places kept for every amount
pub const AMOUNT_SCALE: u32 = 2;

/// Round an amount to whole cents, halves away from zero
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received
    Income,

    /// Money spent
    Expense,
}

impl TransactionKind {
    /// Tag used by the binary data file
    pub fn tag(self) -> u32 {
        match self {
            TransactionKind::Income => 0,
            TransactionKind::Expense => 1,
        }
    }

    /// Inverse of [`TransactionKind::tag`]
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(TransactionKind::Income),
            1 => Some(TransactionKind::Expense),
            _ => None,
        }
    }

    /// Upper-case label used in reports
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => f.write_str("income"),
            TransactionKind::Expense => f.write_str("expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("Invalid transaction kind '{}'", other)),
        }
    }
}

/// A single recorded income or expense
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Store-assigned identifier
    pub id: TransactionId,

    /// Calendar date the money moved
    pub date: Date,

    /// Strictly positive amount
    pub amount: Decimal,

    /// Income or expense
    pub kind: TransactionKind,

    /// Short label used for grouping in the category summary
    pub category: String,

    /// Free-text note
    pub description: String,
}

/// Trim a text field and enforce its byte bound
///
/// Overlong input is rejected rather than truncated. NUL bytes are rejected
/// because the data file pads text fields with them.
pub fn normalize_text(field: &str, value: &str, max_len: usize) -> Result<String, LedgerError> {
    let trimmed = value.trim();

    if trimmed.contains('\0') {
        return Err(LedgerError::invalid_text(field, "contains a NUL character"));
    }

    if trimmed.len() > max_len {
        return Err(LedgerError::invalid_text(
            field,
            format!("{} bytes exceeds the limit of {}", trimmed.len(), max_len),
        ));
    }

    Ok(trimmed.to_string())
}
