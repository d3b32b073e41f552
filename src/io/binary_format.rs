//! Fixed-layout binary data file
//!
//! The data file is a header followed by `count` fixed-size records. All
//! integers are little-endian `u32`.
//!
//! ```text
//! header:  count u32 | next_id u32
//! record:  id u32 | day u32 | month u32 | year u32
//!          | amount [u8; 16]          (rust_decimal serialized form)
//!          | kind u32                 (0 = income, 1 = expense)
//!          | category [u8; 30]        (UTF-8, NUL padded)
//!          | description [u8; 100]    (UTF-8, NUL padded)
//! ```
//!
//! Encoding is strict. Decoding is lenient: it keeps every complete leading
//! record and stops at the first one that is truncated or invalid, reporting
//! why in [`Snapshot::stopped_at`].

use crate::types::{
    Date, LedgerError, Transaction, TransactionId, TransactionKind, MAX_CATEGORY_LEN,
    MAX_DESCRIPTION_LEN,
};
use rust_decimal::Decimal;

/// Size of the file header in bytes
pub const HEADER_SIZE: usize = 8;

const AMOUNT_SIZE: usize = 16;

/// Size of one transaction record in bytes
pub const RECORD_SIZE: usize = 4 * 4 + AMOUNT_SIZE + 4 + MAX_CATEGORY_LEN + MAX_DESCRIPTION_LEN;

/// Result of decoding a data file
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Next id counter as written in the header
    pub next_id: TransactionId,

    /// Records decoded successfully, in file order
    pub transactions: Vec<Transaction>,

    /// Record count announced by the header
    pub declared_count: u32,

    /// First decode failure, if the file was not fully readable
    pub stopped_at: Option<LedgerError>,
}

impl Snapshot {
    fn empty(stopped_at: Option<LedgerError>) -> Self {
        Snapshot {
            next_id: 1,
            transactions: Vec::new(),
            declared_count: 0,
            stopped_at,
        }
    }

    /// Whether every announced record was recovered
    pub fn is_complete(&self) -> bool {
        self.stopped_at.is_none() && self.transactions.len() == self.declared_count as usize
    }
}

/// Serialize the full store
///
/// # Errors
///
/// Fails with `InvalidText` if a text field does not fit its fixed width,
/// which can only happen for transactions built outside the store.
pub fn encode(next_id: TransactionId, transactions: &[Transaction]) -> Result<Vec<u8>, LedgerError> {
    let count = u32::try_from(transactions.len()).map_err(|_| {
        LedgerError::corrupt_record(0, "too many transactions for the file header")
    })?;

    let mut bytes = Vec::with_capacity(HEADER_SIZE + transactions.len() * RECORD_SIZE);
    bytes.extend_from_slice(&count.to_le_bytes());
    bytes.extend_from_slice(&next_id.to_le_bytes());

    for tx in transactions {
        bytes.extend_from_slice(&tx.id.to_le_bytes());
        bytes.extend_from_slice(&tx.date.day().to_le_bytes());
        bytes.extend_from_slice(&tx.date.month().to_le_bytes());
        bytes.extend_from_slice(&tx.date.year().to_le_bytes());
        bytes.extend_from_slice(&tx.amount.serialize());
        bytes.extend_from_slice(&tx.kind.tag().to_le_bytes());
        write_text(&mut bytes, "category", &tx.category, MAX_CATEGORY_LEN)?;
        write_text(&mut bytes, "description", &tx.description, MAX_DESCRIPTION_LEN)?;
    }

    Ok(bytes)
}

fn write_text(
    bytes: &mut Vec<u8>,
    field: &str,
    value: &str,
    width: usize,
) -> Result<(), LedgerError> {
    let raw = value.as_bytes();
    if raw.len() > width {
        return Err(LedgerError::invalid_text(
            field,
            format!("{} bytes does not fit a {}-byte field", raw.len(), width),
        ));
    }
    bytes.extend_from_slice(raw);
    bytes.resize(bytes.len() + (width - raw.len()), 0);
    Ok(())
}

/// Deserialize a data file, recovering as much as possible
pub fn decode(bytes: &[u8]) -> Snapshot {
    if bytes.len() < HEADER_SIZE {
        return Snapshot::empty(Some(LedgerError::corrupt_record(
            0,
            format!("header truncated to {} bytes", bytes.len()),
        )));
    }

    let mut header = FieldReader::new(&bytes[..HEADER_SIZE]);
    let declared_count = header.u32();
    let next_id = header.u32();

    let mut transactions = Vec::new();
    let mut stopped_at = None;

    for index in 0..declared_count as usize {
        let offset = HEADER_SIZE + index * RECORD_SIZE;
        let end = offset + RECORD_SIZE;
        if end > bytes.len() {
            stopped_at = Some(LedgerError::corrupt_record(
                offset,
                format!(
                    "file ends after {} of {} records",
                    transactions.len(),
                    declared_count
                ),
            ));
            break;
        }

        match decode_record(&bytes[offset..end], offset) {
            Ok(tx) => transactions.push(tx),
            Err(e) => {
                stopped_at = Some(e);
                break;
            }
        }
    }

    Snapshot {
        next_id,
        transactions,
        declared_count,
        stopped_at,
    }
}

/// Decode one `RECORD_SIZE` chunk located at `offset` in the file
pub fn decode_record(chunk: &[u8], offset: usize) -> Result<Transaction, LedgerError> {
    if chunk.len() != RECORD_SIZE {
        return Err(LedgerError::corrupt_record(
            offset,
            format!("expected {} bytes, found {}", RECORD_SIZE, chunk.len()),
        ));
    }

    let mut reader = FieldReader::new(chunk);
    let id = reader.u32();
    let day = reader.u32();
    let month = reader.u32();
    let year = reader.u32();
    let amount = Decimal::deserialize(reader.array::<AMOUNT_SIZE>());
    let tag = reader.u32();
    let category = reader.text(MAX_CATEGORY_LEN);
    let description = reader.text(MAX_DESCRIPTION_LEN);

    if id == 0 {
        return Err(LedgerError::corrupt_record(offset, "transaction id 0"));
    }
    let date = Date::new(day, month, year)
        .map_err(|e| LedgerError::corrupt_record(offset, e.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::corrupt_record(
            offset,
            format!("non-positive amount {}", amount),
        ));
    }
    let kind = TransactionKind::from_tag(tag)
        .ok_or_else(|| LedgerError::corrupt_record(offset, format!("unknown kind tag {}", tag)))?;
    let category = String::from_utf8(category.to_vec())
        .map_err(|_| LedgerError::corrupt_record(offset, "category is not valid UTF-8"))?;
    let description = String::from_utf8(description.to_vec())
        .map_err(|_| LedgerError::corrupt_record(offset, "description is not valid UTF-8"))?;

    Ok(Transaction {
        id,
        date,
        amount,
        kind,
        category,
        description,
    })
}

/// Sequential reader over a slice whose length the caller has checked
struct FieldReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        FieldReader { bytes, pos: 0 }
    }

    fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        buf
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.array::<4>())
    }

    /// Fixed-width text field with trailing NUL padding stripped
    fn text(&mut self, width: usize) -> &'a [u8] {
        let field = &self.bytes[self.pos..self.pos + width];
        self.pos += width;
        let len = field.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        &field[..len]
    }
}
