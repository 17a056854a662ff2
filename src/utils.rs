//! # Utility Functions
//!
//! Input parsing and display formatting shared by the library and the CLI.

use crate::error::{AnnotationError, AnnotationResult};

/// Hex input handling
pub mod hex_input {
    use super::*;

    /// Parse pasted transaction hex into bytes.
    ///
    /// Whitespace anywhere in the input is ignored, so wrapped hex dumps can
    /// be pasted directly. The remaining text must be non-empty, even-length
    /// hex.
    pub fn parse(input: &str) -> AnnotationResult<Vec<u8>> {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(AnnotationError::invalid_hex("input is empty"));
        }
        hex::decode(&compact).map_err(|e| AnnotationError::invalid_hex(e.to_string()))
    }
}

/// Transaction ID and long value formatting
pub mod txid {
    use crate::config::display::{TXID_DISPLAY_PREFIX, TXID_DISPLAY_SUFFIX};

    /// Format a transaction ID for display
    pub fn format_short(txid: &str) -> String {
        format_with_length(txid, TXID_DISPLAY_PREFIX, TXID_DISPLAY_SUFFIX)
    }

    /// Keep `prefix_len` leading and `suffix_len` trailing characters
    pub fn format_with_length(value: &str, prefix_len: usize, suffix_len: usize) -> String {
        // Values are hex or ASCII mnemonics, so byte offsets are char offsets
        if value.len() <= prefix_len + suffix_len + 3 || !value.is_ascii() {
            value.to_string()
        } else {
            format!(
                "{}...{}",
                &value[..prefix_len],
                &value[value.len() - suffix_len..]
            )
        }
    }
}

/// Amount formatting utilities
pub mod amount {
    /// Convert satoshis to BTC with 8 decimal places
    pub fn sats_to_btc(sats: u64) -> f64 {
        sats as f64 / 100_000_000.0
    }

    /// Format amount with both sats and BTC
    pub fn format_dual(sats: u64) -> String {
        format!("{} sats ({:.8} BTC)", sats, sats_to_btc(sats))
    }
}

/// Byte offset formatting
pub mod offset {
    /// Format an offset as `0x`-prefixed hex padded to whole bytes
    pub fn format_hex(offset: usize) -> String {
        let digits = format!("{:x}", offset);
        let width = digits.len() + digits.len() % 2;
        format!("0x{:0>width$}", digits, width = width)
    }
}
