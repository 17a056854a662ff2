//! # Transaction Summary
//!
//! Whole-transaction facts shown next to the byte map: id, sizes, counts,
//! total output value, replace-by-fee signalling and locktime. Sizes and
//! weight are read from the `bitcoin` codec, not recomputed here.

use crate::config::summary::{LOCKTIME_THRESHOLD, RBF_SEQUENCE_THRESHOLD};
use crate::utils;
use bitcoin::Transaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Basic transaction dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub txid: String,
    /// Serialized size in bytes, witness included
    pub size: usize,
    pub vsize: usize,
    pub weight: u64,
    pub input_count: usize,
    pub output_count: usize,
    pub total_output_value: u64,
    pub is_rbf_enabled: bool,
    pub lock_time: u32,
    /// `block N` for heights, a UTC date for timestamps
    pub lock_time_display: String,
}

impl TransactionSummary {
    pub fn from_transaction(tx: &Transaction) -> Self {
        let lock_time = tx.lock_time.to_consensus_u32();

        Self {
            txid: tx.compute_txid().to_string(),
            size: tx.total_size(),
            vsize: tx.vsize(),
            weight: tx.weight().to_wu(),
            input_count: tx.input.len(),
            output_count: tx.output.len(),
            total_output_value: tx.output.iter().map(|o| o.value.to_sat()).sum(),
            is_rbf_enabled: tx
                .input
                .iter()
                .any(|i| i.sequence.0 < RBF_SEQUENCE_THRESHOLD),
            lock_time,
            lock_time_display: format_lock_time(lock_time),
        }
    }
}

/// Render a consensus locktime as a block height or a UTC timestamp
pub fn format_lock_time(lock_time: u32) -> String {
    if lock_time < LOCKTIME_THRESHOLD {
        return format!("block {}", lock_time);
    }

    match DateTime::<Utc>::from_timestamp(i64::from(lock_time), 0) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("time {}", lock_time),
    }
}

impl fmt::Display for TransactionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📋 Transaction: {}", self.txid)?;
        writeln!(
            f,
            "📏 Bytes: {} | Virtual Size: {} vB | Weight: {} WU",
            self.size, self.vsize, self.weight
        )?;
        writeln!(
            f,
            "📊 Inputs: {} | Outputs: {} | Output Value: {}",
            self.input_count,
            self.output_count,
            utils::amount::format_dual(self.total_output_value)
        )?;
        write!(
            f,
            "🔒 RBF: {} | Locktime: {}",
            if self.is_rbf_enabled { "Yes" } else { "No" },
            self.lock_time_display
        )
    }
}
