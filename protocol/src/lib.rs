// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Catena Protocol, Transaction Lifecycle Core
//!
//! Client-side plumbing for catapult-style chains: turn the REST form of a
//! transaction into a typed value, find out what its aliases resolved to,
//! and follow a submitted transaction until the network confirms or
//! rejects it.
//!
//! ## Architecture
//!
//! - **transaction**: Typed transactions, the factory that decodes REST
//!   records, and the binary serializer / hasher.
//! - **receipt**: Block statements and the alias resolution engine.
//! - **network**: Listener subscriptions and the announce/confirm race.
//! - **account**: Addresses, keys, network identifiers.
//! - **crypto**: SHA3-256 and merkle roots.
//! - **config**: Layout constants and client configuration.
//!
//! ## Design Philosophy
//!
//! 1. Decoding is total or fails. No half-built transaction ever escapes.
//! 2. Resolution matches exactly or fails. No "closest" receipt.
//! 3. Subscriptions belong to one announcement and die with it.

pub mod account;
pub mod config;
pub mod crypto;
pub mod network;
pub mod receipt;
pub mod transaction;

pub use config::ClientConfig;
pub use network::{AnnounceOutcome, Announcer, ListenerHub, SignedTransaction};
pub use receipt::{resolve, Statement, TransactionService};
pub use transaction::{decode, transaction_hash, DecodingError, Transaction};
