//! # Configuration Constants
//!
//! This module contains the configuration values used throughout the
//! transaction annotator and its command line front end.

/// Wire format constants
pub mod wire {
    /// Width of the version field in bytes
    pub const VERSION_LEN: usize = 4;

    /// Width of a previous transaction id in bytes
    pub const TXID_LEN: usize = 32;

    /// Width of a previous output index in bytes
    pub const OUTPUT_INDEX_LEN: usize = 4;

    /// Width of an input sequence number in bytes
    pub const SEQUENCE_LEN: usize = 4;

    /// Width of an output value in bytes
    pub const VALUE_LEN: usize = 8;

    /// Width of the locktime field in bytes
    pub const LOCKTIME_LEN: usize = 4;

    /// Expected SegWit marker byte
    pub const SEGWIT_MARKER: u8 = 0x00;

    /// Expected SegWit flag byte
    pub const SEGWIT_FLAG: u8 = 0x01;
}

/// Transaction summary thresholds
pub mod summary {
    /// Locktime values below this are block heights, at or above it are
    /// UNIX timestamps (BIP 65 / consensus `LOCKTIME_THRESHOLD`).
    pub const LOCKTIME_THRESHOLD: u32 = 500_000_000;

    /// Any input sequence strictly below this signals replace-by-fee (BIP 125).
    pub const RBF_SEQUENCE_THRESHOLD: u32 = 0xffff_fffe;
}

/// Display settings for the command line output
pub mod display {
    /// Characters kept at the start of a shortened transaction id
    pub const TXID_DISPLAY_PREFIX: usize = 8;

    /// Characters kept at the end of a shortened transaction id
    pub const TXID_DISPLAY_SUFFIX: usize = 8;

    /// Decoded values longer than this are shortened in table output
    pub const MAX_VALUE_WIDTH: usize = 64;

    /// Stdin marker for the hex argument
    pub const STDIN_MARKER: &str = "-";
}

/// Logging configuration
pub mod logging {
    /// Filter used when no environment override is present
    pub const DEFAULT_FILTER: &str = "warn";

    /// Filter used with `--verbose`
    pub const VERBOSE_FILTER: &str = "debug";
}

/// Environment variable names
pub mod env {
    /// Log filter override (env_logger syntax)
    pub const LOG_FILTER: &str = "TXMAP_LOG";

    /// Log style override (`auto`, `always`, `never`)
    pub const LOG_STYLE: &str = "TXMAP_LOG_STYLE";
}
