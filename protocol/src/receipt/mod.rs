//! # Receipt Module
//!
//! Block statements and alias resolution.
//!
//! A transaction may name a recipient or a mosaic through a namespace
//! alias. The chain resolves the alias when the transaction is included and
//! records the outcome in the block's [`Statement`]. This module reads that
//! record back:
//!
//! - [`resolve`] answers a single query against a statement.
//! - [`TransactionService`] rewrites whole transactions, fetching
//!   statements through a [`ReceiptLookup`].

pub mod resolution;
pub mod service;
pub mod statement;

pub use resolution::{resolve, resolve_address, resolve_mosaic_id, ResolutionError};
pub use service::{
    InMemoryLookup, LookupError, ReceiptLookup, TransactionLookup, TransactionService,
};
pub use statement::{
    ReceiptSource, ResolutionEntry, ResolutionStatement, ResolutionType, ResolvedValue, Statement,
    Unresolved,
};
