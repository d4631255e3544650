//! Whole-transaction alias resolution on top of remote lookups.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::try_join_all;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::resolution::{resolve_address, resolve_mosaic_id, ResolutionError};
use super::statement::Statement;
use crate::transaction::{
    decode, Transaction, TransactionBody, TransactionInfo, UnresolvedAddress, UnresolvedMosaicId,
};

/// Failure of a statement or transaction lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("lookup unavailable: {0}")]
    Unavailable(String),
}

/// Source of block statements.
#[async_trait]
pub trait ReceiptLookup: Send + Sync {
    async fn statement(&self, height: u64) -> Result<Statement, LookupError>;
}

/// Source of raw transaction records, in the REST shape.
#[async_trait]
pub trait TransactionLookup: Send + Sync {
    async fn transactions(&self, hashes: &[String]) -> Result<Vec<Value>, LookupError>;
}

// ---------------------------------------------------------------------------
// In-memory lookups
// ---------------------------------------------------------------------------

/// Lookups served from local tables. Used by the CLI and by tests.
#[derive(Debug, Default)]
pub struct InMemoryLookup {
    statements: DashMap<u64, Statement>,
    records: DashMap<String, Value>,
}

impl InMemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_statement(&self, height: u64, statement: Statement) {
        self.statements.insert(height, statement);
    }

    /// Stores a record under its `meta.hash`. Records without one are
    /// ignored.
    pub fn insert_record(&self, record: Value) {
        if let Some(hash) = record.pointer("/meta/hash").and_then(Value::as_str) {
            self.records.insert(hash.to_uppercase(), record);
        }
    }
}

#[async_trait]
impl ReceiptLookup for InMemoryLookup {
    async fn statement(&self, height: u64) -> Result<Statement, LookupError> {
        self.statements
            .get(&height)
            .map(|s| s.value().clone())
            .ok_or_else(|| LookupError::NotFound(format!("statement at height {height}")))
    }
}

#[async_trait]
impl TransactionLookup for InMemoryLookup {
    async fn transactions(&self, hashes: &[String]) -> Result<Vec<Value>, LookupError> {
        hashes
            .iter()
            .map(|hash| {
                self.records
                    .get(&hash.to_uppercase())
                    .map(|r| r.value().clone())
                    .ok_or_else(|| LookupError::NotFound(format!("transaction {hash}")))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// TransactionService
// ---------------------------------------------------------------------------

/// Replaces aliases in decoded transactions with the values the chain
/// resolved them to.
#[derive(Clone)]
pub struct TransactionService {
    receipts: Arc<dyn ReceiptLookup>,
    transactions: Arc<dyn TransactionLookup>,
}

impl TransactionService {
    pub fn new(receipts: Arc<dyn ReceiptLookup>, transactions: Arc<dyn TransactionLookup>) -> Self {
        Self {
            receipts,
            transactions,
        }
    }

    /// Returns a copy of `transaction` with every alias resolved.
    ///
    /// A transaction without block metadata is returned unchanged. An
    /// aggregate inner transaction passed on its own fails with
    /// [`ResolutionError::MissingTransactionInfo`], since its top-level
    /// position is unknown.
    pub async fn resolve_aliases(
        &self,
        transaction: &Transaction,
    ) -> Result<Transaction, ResolutionError> {
        let (height, top_level_index) = match &transaction.info {
            None => return Ok(transaction.clone()),
            Some(TransactionInfo::AggregateInner { .. }) => {
                return Err(ResolutionError::MissingTransactionInfo)
            }
            Some(TransactionInfo::Standalone { height, index, .. }) => (*height, *index),
        };

        if !has_aliases(transaction) {
            return Ok(transaction.clone());
        }

        let mut resolved = transaction.clone();
        let statement = self.receipts.statement(height).await?;
        match &mut resolved.body {
            TransactionBody::AggregateComplete(aggregate)
            | TransactionBody::AggregateBonded(aggregate) => {
                for (position, inner) in aggregate.transactions.iter_mut().enumerate() {
                    let inner_index = match &inner.info {
                        Some(info) => info.index(),
                        None => u32::try_from(position)
                            .map_err(|_| ResolutionError::MissingTransactionInfo)?,
                    };
                    rewrite(
                        &mut inner.body,
                        &statement,
                        height,
                        top_level_index,
                        Some(inner_index),
                    )?;
                }
            }
            body => rewrite(body, &statement, height, top_level_index, None)?,
        }

        debug!(height, index = top_level_index, "aliases resolved");
        Ok(resolved)
    }

    /// Fetches, decodes and resolves the transactions with the given hashes.
    pub async fn resolve_many(
        &self,
        hashes: &[String],
    ) -> Result<Vec<Transaction>, ResolutionError> {
        let records = self.transactions.transactions(hashes).await?;
        let decoded = records
            .iter()
            .map(decode)
            .collect::<Result<Vec<_>, _>>()?;

        try_join_all(decoded.iter().map(|tx| async move {
            self.resolve_aliases(tx).await.map_err(|e| {
                warn!(hash = tx.hash().unwrap_or("-"), error = %e, "alias resolution failed");
                e
            })
        }))
        .await
    }
}

fn has_aliases(transaction: &Transaction) -> bool {
    match transaction.inner_transactions() {
        [] => transaction.body.has_aliases(),
        inner => inner.iter().any(|tx| tx.body.has_aliases()),
    }
}

fn rewrite(
    body: &mut TransactionBody,
    statement: &Statement,
    height: u64,
    top_level_index: u32,
    inner_index: Option<u32>,
) -> Result<(), ResolutionError> {
    for address in body.unresolved_addresses_mut() {
        if address.is_alias() {
            let concrete =
                resolve_address(statement, address, height, top_level_index, inner_index)?;
            *address = UnresolvedAddress::Address(concrete);
        }
    }
    for mosaic_id in body.unresolved_mosaic_ids_mut() {
        if mosaic_id.is_alias() {
            let concrete =
                resolve_mosaic_id(statement, mosaic_id, height, top_level_index, inner_index)?;
            *mosaic_id = UnresolvedMosaicId::Mosaic(concrete);
        }
    }
    Ok(())
}
