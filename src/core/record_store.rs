//! The record store
//!
//! This module provides the `RecordStore` aggregate root. It owns every
//! transaction of the ledger in insertion order, hands out identifiers,
//! validates input, computes aggregate views and flushes the full set to its
//! storage backend after every mutation.
//!
//! # Identifiers
//!
//! Ids start at 1 and come from a monotonic counter that is persisted with
//! the data. Deleting a transaction never gives its id back.
//!
//! # Failure Model
//!
//! Validation happens before any state is touched. If the flush that follows
//! a successful add or delete fails, the in-memory change is kept and the
//! caller receives `LedgerError::Unsaved`.
//!
//! # Loading
//!
//! A missing data file yields an empty store. A damaged file yields every
//! complete leading record; the rest is dropped with a warning.

use crate::core::traits::Storage;
use crate::io::binary_format;
use crate::types::{
    normalize_text, round_amount, CategoryTotal, Date, LedgerError, PeriodSummary, Transaction,
    TransactionId, TransactionKind, MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Default maximum number of transactions held by a store
pub const DEFAULT_CAPACITY: usize = 1000;

/// In-memory ledger backed by a [`Storage`]
#[derive(Debug)]
pub struct RecordStore<S: Storage> {
    storage: S,
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    capacity: usize,
}

impl<S: Storage> RecordStore<S> {
    /// Create an empty store without touching storage
    pub fn new(storage: S, capacity: usize) -> Self {
        RecordStore {
            storage,
            transactions: Vec::new(),
            next_id: 1,
            capacity,
        }
    }

    /// Create a store and load whatever its storage holds
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the backend cannot be read at all.
    /// Damaged data is not an error; see [`RecordStore::load`].
    pub fn open(storage: S, capacity: usize) -> Result<Self, LedgerError> {
        let mut store = Self::new(storage, capacity);
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory state with the stored one
    ///
    /// Returns the number of transactions recovered.
    pub fn load(&mut self) -> Result<usize, LedgerError> {
        let location = self.storage.location();

        let Some(bytes) = self.storage.read()? else {
            info!(%location, "no data file yet, starting with an empty ledger");
            self.transactions.clear();
            self.next_id = 1;
            return Ok(0);
        };

        let snapshot = binary_format::decode(&bytes);
        if let Some(error) = &snapshot.stopped_at {
            warn!(
                %location,
                declared = snapshot.declared_count,
                recovered = snapshot.transactions.len(),
                %error,
                "data file is damaged, keeping the readable transactions"
            );
        }

        // The counter must stay ahead of every id actually present
        let max_id = snapshot.transactions.iter().map(|tx| tx.id).max().unwrap_or(0);
        let next_id = snapshot.next_id.max(max_id.saturating_add(1)).max(1);
        if next_id != snapshot.next_id {
            warn!(
                stored = snapshot.next_id,
                corrected = next_id,
                "next id counter was behind the stored transactions"
            );
        }

        if snapshot.transactions.len() > self.capacity {
            warn!(
                count = snapshot.transactions.len(),
                capacity = self.capacity,
                "data file holds more transactions than the configured capacity"
            );
        }

        self.transactions = snapshot.transactions;
        self.next_id = next_id;

        info!(%location, count = self.transactions.len(), next_id, "ledger loaded");
        Ok(self.transactions.len())
    }

    /// Write the full store to storage, replacing what was there
    pub fn save(&mut self) -> Result<(), LedgerError> {
        let bytes = binary_format::encode(self.next_id, &self.transactions)?;
        self.storage.write(&bytes)?;
        debug!(
            location = %self.storage.location(),
            count = self.transactions.len(),
            bytes = bytes.len(),
            "ledger saved"
        );
        Ok(())
    }

    fn flush_after(&mut self, operation: &str, id: TransactionId) -> Result<(), LedgerError> {
        self.save().map_err(|e| {
            warn!(operation, id, error = %e, "change applied in memory but not saved");
            LedgerError::unsaved(operation, id, &e)
        })
    }

    /// Record a new transaction
    ///
    /// The date is validated when the [`Date`] is built. The amount is
    /// rounded to whole cents. Category and description are trimmed and
    /// bounded.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` rounds to zero or below
    /// - `InvalidText` if category or description break their bounds
    /// - `CapacityExceeded` if the store is full
    /// - `Unsaved` if the transaction was recorded but the flush failed
    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        date: Date,
        amount: Decimal,
        category: &str,
        description: &str,
    ) -> Result<Transaction, LedgerError> {
        let rounded = round_amount(amount);
        if rounded <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }
        let amount = rounded;
        let category = normalize_text("category", category, MAX_CATEGORY_LEN)?;
        let description = normalize_text("description", description, MAX_DESCRIPTION_LEN)?;

        let capacity_error = LedgerError::CapacityExceeded {
            capacity: self.capacity,
        };
        if self.transactions.len() >= self.capacity {
            return Err(capacity_error);
        }
        let following = self.next_id.checked_add(1).ok_or(capacity_error)?;

        let transaction = Transaction {
            id: self.next_id,
            date,
            amount,
            kind,
            category,
            description,
        };
        self.next_id = following;
        self.transactions.push(transaction.clone());

        info!(id = transaction.id, %kind, amount = %transaction.amount, "transaction added");
        self.flush_after("add", transaction.id)?;

        Ok(transaction)
    }

    /// Remove the transaction with `id`, keeping the order of the others
    ///
    /// Should duplicate ids ever exist, the last one in list order goes.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no transaction has this id
    /// - `Unsaved` if the transaction was removed but the flush failed
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<Transaction, LedgerError> {
        let index = self
            .transactions
            .iter()
            .rposition(|tx| tx.id == id)
            .ok_or_else(|| LedgerError::not_found(id))?;

        let removed = self.transactions.remove(index);

        info!(id, "transaction deleted");
        self.flush_after("delete", id)?;

        Ok(removed)
    }

    /// All transactions in insertion order
    pub fn list_all(&self) -> &[Transaction] {
        &self.transactions
    }

    fn total_for(&self, kind: TransactionKind) -> Decimal {
        self.transactions
            .iter()
            .filter(|tx| tx.kind == kind)
            .fold(Decimal::ZERO, |sum, tx| sum.saturating_add(tx.amount))
    }

    pub fn total_income(&self) -> Decimal {
        self.total_for(TransactionKind::Income)
    }

    pub fn total_expense(&self) -> Decimal {
        self.total_for(TransactionKind::Expense)
    }

    /// Income minus expense over the whole ledger
    pub fn balance(&self) -> Decimal {
        self.totals().balance()
    }

    /// Income and expense totals over the whole ledger
    pub fn totals(&self) -> PeriodSummary {
        PeriodSummary {
            income: self.total_income(),
            expense: self.total_expense(),
        }
    }

    /// Totals for one calendar month
    ///
    /// Months outside 1..=12 simply match nothing.
    pub fn monthly_summary(&self, month: u32, year: u32) -> PeriodSummary {
        self.transactions
            .iter()
            .filter(|tx| tx.date.month() == month && tx.date.year() == year)
            .fold(PeriodSummary::default(), |mut summary, tx| {
                match tx.kind {
                    TransactionKind::Income => {
                        summary.income = summary.income.saturating_add(tx.amount)
                    }
                    TransactionKind::Expense => {
                        summary.expense = summary.expense.saturating_add(tx.amount)
                    }
                }
                summary
            })
    }

    /// Expense totals per category, in first-seen order
    ///
    /// Categories are compared exactly, so "Food" and "food" are distinct.
    pub fn category_summary(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();

        for tx in self
            .transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Expense)
        {
            match totals.iter_mut().find(|entry| entry.category == tx.category) {
                Some(entry) => entry.total = entry.total.saturating_add(tx.amount),
                None => totals.push(CategoryTotal {
                    category: tx.category.clone(),
                    total: tx.amount,
                }),
            }
        }

        totals
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Id the next added transaction will receive
    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
