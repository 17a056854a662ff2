//! # bitcoin-txmap: Byte-Level Transaction Annotation
//!
//! Maps every byte of a consensus-serialized Bitcoin transaction (legacy or
//! SegWit) to the field it encodes, its decoded value and its exact range.

pub mod annotation;
pub mod config;
pub mod error;
pub mod script;
pub mod summary;
pub mod utils;
pub mod varint;

// Re-export commonly used types
pub use annotation::{
    annotate, AnnotatedTransaction, AnnotationIndex, AnnotationRange, ByteInfo, DataType,
    Diagnostic, FieldKind, Location, Tag, TransactionWalker,
};
pub use error::{AnnotationError, AnnotationResult};
pub use summary::TransactionSummary;
