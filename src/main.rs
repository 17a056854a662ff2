//! # txmap: Bitcoin Transaction Byte Map
//!
//! Command line front end for the annotation library. Paste a serialized
//! transaction and see which bytes encode which field.
//!
//! ```text
//! 01000000 01 c997a5e5...  ──>  [0, 4)    version          1
//!                               [4, 5)    inputCount       1
//!                               [5, 37)   input-0 prevTxId 0437cd7f...e5a597c9
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Every annotated range, one per line
//! txmap annotate 0100000001c997a5e5...
//!
//! # What does byte 42 encode?
//! txmap lookup 0100000001c997a5e5... 42
//!
//! # Sizes, counts, RBF and locktime
//! txmap summary 0100000001c997a5e5... --json
//!
//! # Read hex from stdin
//! cat tx.hex | txmap annotate -
//! ```
//!
//! Logging is controlled with `TXMAP_LOG` (env_logger filter syntax) or
//! `--verbose`; a `.env` file in the working directory is honoured.

use anyhow::{Context, Result};
use bitcoin_txmap::{
    config::{display, env as env_vars, logging},
    utils, AnnotatedTransaction, AnnotationRange,
};
use clap::{Parser, Subcommand};
use std::io::Read;

#[derive(Parser)]
#[command(name = "txmap")]
#[command(about = "Map every byte of a Bitcoin transaction to the field it encodes")]
#[command(version)]
struct Cli {
    /// Display debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every annotated byte range
    Annotate {
        /// Transaction hex, or "-" to read it from stdin
        hex: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Describe the byte at an offset and the field it belongs to
    Lookup {
        /// Transaction hex, or "-" to read it from stdin
        hex: String,
        /// Byte offset into the serialized transaction
        #[arg(allow_negative_numbers = true)]
        offset: i64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show transaction id, sizes, counts, RBF and locktime
    Summary {
        /// Transaction hex, or "-" to read it from stdin
        hex: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Annotate { hex, json } => {
            annotate(&hex, json)?;
        }
        Commands::Lookup { hex, offset, json } => {
            lookup(&hex, offset, json)?;
        }
        Commands::Summary { hex, json } => {
            summary(&hex, json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        logging::VERBOSE_FILTER
    } else {
        logging::DEFAULT_FILTER
    };
    let env = env_logger::Env::new()
        .filter_or(env_vars::LOG_FILTER, default_filter)
        .write_style(env_vars::LOG_STYLE);
    env_logger::Builder::from_env(env).init();
}

/// Read the hex argument (or stdin) and annotate it
fn load(input: &str) -> Result<AnnotatedTransaction> {
    let text = if input == display::STDIN_MARKER {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read transaction hex from stdin")?;
        buffer
    } else {
        input.to_string()
    };

    AnnotatedTransaction::from_hex(&text).context("Could not parse transaction")
}

fn annotate(input: &str, json: bool) -> Result<()> {
    let annotated = load(input)?;
    let index = annotated.index();

    if json {
        println!("{}", serde_json::to_string_pretty(index)?);
        return Ok(());
    }

    println!(
        "Transaction {} | {} bytes | {} ranges",
        utils::txid::format_short(&annotated.transaction().compute_txid().to_string()),
        annotated.bytes().len(),
        index.len()
    );
    for range in index {
        println!(
            "[{:>6}, {:>6})  {:<40} {}",
            range.start,
            range.end,
            tag_list(range),
            shorten(&range.value)
        );
    }
    for diagnostic in index.diagnostics() {
        println!("⚠️  {}", diagnostic);
    }

    Ok(())
}

fn lookup(input: &str, offset: i64, json: bool) -> Result<()> {
    let annotated = load(input)?;
    let info = annotated
        .byte_info(offset)
        .with_context(|| format!("Offset {} is outside the annotated bytes", offset))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let tags = info
        .tags
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    println!("Byte:        {}", info.byte);
    println!("Offset:      {} ({})", info.offset, info.offset_hex);
    println!("Range:       [{}, {})", info.start, info.end);
    println!("Tags:        {}", tags);
    println!("Description: {}", info.description);
    println!("Value:       {}", info.value);

    Ok(())
}

fn summary(input: &str, json: bool) -> Result<()> {
    let annotated = load(input)?;
    let summary = annotated.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }

    Ok(())
}

fn tag_list(range: &AnnotationRange) -> String {
    range
        .tags()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn shorten(value: &str) -> String {
    let keep = (display::MAX_VALUE_WIDTH - 3) / 2;
    if value.len() > display::MAX_VALUE_WIDTH {
        utils::txid::format_with_length(value, keep, keep)
    } else {
        value.to_string()
    }
}
