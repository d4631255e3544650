//! # CLI Interface
//!
//! Argument structure for the `catena` binary. Four subcommands: `decode`,
//! `hash`, `resolve` and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Offline tools for catapult transactions.
///
/// Reads REST-shaped JSON records, decodes them into typed transactions,
/// recomputes their hash, and resolves namespace aliases against a block
/// statement.
#[derive(Parser, Debug)]
#[command(
    name = "catena",
    about = "Decode, hash and resolve catapult transactions",
    version,
    propagate_version = true
)]
pub struct CatenaCli {
    /// Path to a JSON client configuration file.
    ///
    /// When omitted, TestNet defaults are used.
    #[arg(long, short = 'c', global = true, env = "CATENA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format.
    #[arg(long, global = true, env = "CATENA_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode one record, or an array of records, and print the result.
    Decode(DecodeArgs),
    /// Serialize a record and print its payload and transaction hash.
    Hash(HashArgs),
    /// Replace the aliases of a confirmed record using a block statement.
    Resolve(ResolveArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// JSON file holding a record or an array of records.
    pub file: PathBuf,

    /// Fail when the re-encoded size differs from the record's `size`.
    #[arg(long)]
    pub check_size: bool,
}

#[derive(Parser, Debug)]
pub struct HashArgs {
    /// JSON file holding a single record.
    pub file: PathBuf,

    /// Hex generation hash seed. Overrides the configuration file.
    #[arg(long, env = "CATENA_GENERATION_HASH")]
    pub generation_hash: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// JSON file holding a confirmed record (with `meta`).
    pub transaction: PathBuf,

    /// JSON file holding the statement of the record's block.
    #[arg(long, short = 's')]
    pub statement: PathBuf,
}
