//! # Transaction Annotation
//!
//! Maps every byte of a serialized transaction to the field it encodes.
//!
//! ```text
//! raw bytes ─┐
//!            ├─> TransactionWalker ─> AnnotationIndex ─> range_for_byte(offset)
//! bitcoin::Transaction ─┘
//! ```

pub mod index;
pub mod range;
pub mod walker;


pub use index::{AnnotationIndex, Diagnostic};
pub use range::{AnnotationRange, DataType, FieldKind, Location, Tag};
pub use walker::{annotate, has_witness, TransactionWalker};

use crate::error::{AnnotationError, AnnotationResult};
use crate::summary::TransactionSummary;
use crate::utils;
use bitcoin::{consensus, Transaction};
use serde::{Deserialize, Serialize};

/// Everything known about one byte of the transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteInfo {
    pub offset: usize,
    /// The byte itself as two hex digits
    pub byte: String,
    pub offset_hex: String,
    pub description: String,
    pub value: String,
    pub start: usize,
    pub end: usize,
    pub tags: Vec<Tag>,
}

/// A decoded transaction together with its raw bytes and annotation index
#[derive(Debug, Clone)]
pub struct AnnotatedTransaction {
    tx: Transaction,
    bytes: Vec<u8>,
    index: AnnotationIndex,
}

impl AnnotatedTransaction {
    /// Annotate an already decoded transaction using its consensus encoding.
    pub fn new(tx: Transaction) -> AnnotationResult<Self> {
        let bytes = consensus::serialize(&tx);
        Self::with_bytes(tx, bytes)
    }

    /// Decode and annotate consensus bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> AnnotationResult<Self> {
        let tx: Transaction = consensus::deserialize(&bytes)?;
        Self::with_bytes(tx, bytes)
    }

    /// Decode and annotate a hex string.
    pub fn from_hex(input: &str) -> AnnotationResult<Self> {
        Self::from_bytes(utils::hex_input::parse(input)?)
    }

    fn with_bytes(tx: Transaction, bytes: Vec<u8>) -> AnnotationResult<Self> {
        let index = annotate(&bytes, &tx)?;
        Ok(Self { tx, bytes, index })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn index(&self) -> &AnnotationIndex {
        &self.index
    }

    pub fn into_index(self) -> AnnotationIndex {
        self.index
    }

    pub fn summary(&self) -> TransactionSummary {
        TransactionSummary::from_transaction(&self.tx)
    }

    /// Describe the byte at `offset` and the field covering it.
    pub fn byte_info(&self, offset: i64) -> AnnotationResult<ByteInfo> {
        let range = self.index.range_for_byte(offset)?;
        // range_for_byte rejects negative offsets
        let position = offset as usize;
        let byte = self
            .bytes
            .get(position)
            .ok_or(AnnotationError::OffsetNotFound { offset })?;

        Ok(ByteInfo {
            offset: position,
            byte: format!("{:02x}", byte),
            offset_hex: utils::offset::format_hex(position),
            description: range.description.clone(),
            value: range.value.clone(),
            start: range.start,
            end: range.end,
            tags: range.tags(),
        })
    }
}
