//! # Error Types for the Transaction Annotator
//!
//! Fatal decode failures, failed lookups, and the script disassembly failure
//! that the formatter always recovers from locally.

use thiserror::Error;

/// Main error type for annotation operations
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// A fixed-size field or CompactSize read ran past the end of the buffer
    #[error("Truncated input: {field} needs {needed} bytes at offset {offset}, {available} available")]
    TruncatedInput {
        field: &'static str,
        offset: usize,
        needed: u64,
        available: usize,
    },

    /// No range covers the requested byte
    #[error("No annotation covers byte offset {offset}")]
    OffsetNotFound { offset: i64 },

    /// Input text is not an even-length hex string
    #[error("Invalid transaction hex: {message}")]
    InvalidHex { message: String },

    /// The transaction codec rejected the bytes
    #[error("Invalid transaction: {source}")]
    InvalidTransaction {
        #[from]
        source: bitcoin::consensus::encode::Error,
    },
}

/// Result type alias for annotation operations
pub type AnnotationResult<T> = Result<T, AnnotationError>;

impl AnnotationError {
    /// Create a truncation error for `field` at `offset`
    pub fn truncated(field: &'static str, offset: usize, needed: u64, buffer_len: usize) -> Self {
        Self::TruncatedInput {
            field,
            offset,
            needed,
            available: buffer_len.saturating_sub(offset),
        }
    }

    /// Create an invalid hex error with a message
    pub fn invalid_hex(message: impl Into<String>) -> Self {
        Self::InvalidHex {
            message: message.into(),
        }
    }

    /// Check if this error means the transaction could not be parsed at all
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            AnnotationError::TruncatedInput { .. }
                | AnnotationError::InvalidHex { .. }
                | AnnotationError::InvalidTransaction { .. }
        )
    }

    /// Check if this error is a failed offset lookup
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, AnnotationError::OffsetNotFound { .. })
    }
}

/// Reasons a script could not be disassembled into mnemonics
#[derive(Debug, Error)]
pub enum ScriptDecodeFailure {
    /// A push opcode declared more data than the script holds
    #[error("Malformed push: {source}")]
    MalformedPush {
        #[from]
        source: bitcoin::script::Error,
    },

    /// A byte with no assigned opcode
    #[error("Undefined opcode 0x{opcode:02x} at script offset {offset}")]
    InvalidOpcode { opcode: u8, offset: usize },
}
