// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Catena CLI
//!
//! Entry point for the `catena` binary. Parses arguments, initializes
//! logging, loads the client configuration and runs one subcommand:
//!
//! - `decode` : REST record(s) to typed JSON
//! - `hash`   : payload bytes and transaction hash of a record
//! - `resolve`: alias resolution against a block statement
//! - `version`: print build version information

mod cli;
mod config;
mod logging;

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde_json::json;

use catena_protocol::config::{network_name, HASH_LENGTH};
use catena_protocol::receipt::{InMemoryLookup, Statement, TransactionService};
use catena_protocol::transaction::decode;
use catena_protocol::ClientConfig;

use cli::{CatenaCli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CatenaCli::parse();
    logging::init_logging("catena=info,catena_protocol=info", cli.log_format);

    let client = config::load_config(cli.config.as_deref())?;
    tracing::debug!(network = %client.network, "configuration loaded");

    match cli.command {
        Commands::Decode(args) => decode_records(args),
        Commands::Hash(args) => hash_record(args, &client),
        Commands::Resolve(args) => resolve_record(args).await,
        Commands::Version => {
            print_version(&client);
            Ok(())
        }
    }
}

fn decode_records(args: cli::DecodeArgs) -> Result<()> {
    let document = config::read_json(&args.file)?;
    let mut decoded = Vec::new();
    for (position, record) in config::records(document).iter().enumerate() {
        let transaction =
            decode(record).with_context(|| format!("record {position} failed to decode"))?;
        if args.check_size && !transaction.size_matches() {
            let encoded = transaction
                .serialized_size()
                .with_context(|| format!("record {position} cannot be re-encoded"))?;
            bail!(
                "record {position}: carried size {:?} but re-encodes to {encoded} bytes",
                transaction.size
            );
        }
        decoded.push(transaction);
    }
    tracing::info!(count = decoded.len(), "records decoded");
    println!("{}", serde_json::to_string_pretty(&decoded)?);
    Ok(())
}

fn hash_record(args: cli::HashArgs, client: &ClientConfig) -> Result<()> {
    let generation_hash = match &args.generation_hash {
        Some(text) => parse_generation_hash(text)?,
        None => client
            .generation_hash_bytes()
            .ok_or_else(|| anyhow!("no generation hash: pass --generation-hash or set it in the config"))?,
    };

    let record = config::read_json(&args.file)?;
    let transaction = decode(&record).context("record failed to decode")?;
    let payload = transaction.serialize().context("record cannot be re-encoded")?;
    let hash = transaction
        .hash_with(&generation_hash)
        .context("record cannot be hashed")?;
    let deadline = transaction
        .envelope
        .deadline
        .to_datetime(client.epoch_adjustment_secs)
        .map(|at| at.to_rfc3339());

    let output = json!({
        "type": transaction.transaction_type().to_string(),
        "deadline": deadline,
        "size": payload.len(),
        "sizeMatches": transaction.size_matches(),
        "payload": hex::encode_upper(&payload),
        "hash": hash.to_hex(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_generation_hash(text: &str) -> Result<[u8; HASH_LENGTH]> {
    let bytes = hex::decode(text).context("generation hash is not hex")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow!("generation hash must be {HASH_LENGTH} bytes, got {}", b.len()))
}

async fn resolve_record(args: cli::ResolveArgs) -> Result<()> {
    let record = config::read_json(&args.transaction)?;
    let transaction = decode(&record).context("record failed to decode")?;
    let height = transaction
        .info
        .as_ref()
        .map(|info| info.height())
        .ok_or_else(|| anyhow!("record has no meta; only confirmed transactions can be resolved"))?;

    let statement = Statement::from_json(&config::read_json(&args.statement)?)
        .context("statement failed to decode")?;
    let lookup = Arc::new(InMemoryLookup::new());
    lookup.insert_statement(height, statement);

    let service = TransactionService::new(lookup.clone(), lookup);
    let resolved = service
        .resolve_aliases(&transaction)
        .await
        .with_context(|| format!("alias resolution failed at height {height}"))?;
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn print_version(client: &ClientConfig) {
    println!("catena {}", env!("CARGO_PKG_VERSION"));
    let network_id = client.network.as_u8();
    println!("network: {} (0x{:02X})", network_name(network_id), network_id);
}
