//! # Announce/Confirm Coordinator
//!
//! Submits a signed transaction and waits for the first of two events
//! concerning it:
//!
//! ```text
//!              ┌─ confirmed (hash matches) ─▶ Confirmed(tx)
//! Submitted ───┤
//!              └─ status    (hash matches) ─▶ Failed(SubmissionFailed)
//! ```
//!
//! Both subscriptions are opened before the submit, scoped to the
//! transaction's hash, so an event that arrives while the submit is still
//! in flight is buffered rather than missed. When both streams hold a
//! matching event, the one published first wins. Each subscription is
//! held by a guard; whichever way the race ends (an event, a transport
//! error, a timeout, or the caller dropping the future) both slots are
//! released exactly once.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use super::listener::{Listener, Subscription, TransactionEvent, TransactionStatusError};
use super::subscriptions::{Sequenced, Topic};
use crate::account::{Address, Hash256, NetworkType};
use crate::config::{
    ClientConfig, DEFAULT_ANNOUNCE_TIMEOUT, HASH_LENGTH, SIGNABLE_OFFSET, TRANSACTION_HEADER_SIZE,
};
use crate::transaction::{transaction_hash, DecodingError, Transaction, TransactionType};

// ---------------------------------------------------------------------------
// Signed transaction
// ---------------------------------------------------------------------------

/// A serialized, signed top-level transaction ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub payload: Vec<u8>,
    pub hash: Hash256,
    /// Address of the signer; listener subscriptions are scoped to it.
    pub signer: Address,
    pub transaction_type: TransactionType,
    pub network: NetworkType,
}

impl SignedTransaction {
    pub fn new(
        payload: Vec<u8>,
        hash: Hash256,
        signer: Address,
        transaction_type: TransactionType,
        network: NetworkType,
    ) -> Self {
        Self {
            payload,
            hash,
            signer,
            transaction_type,
            network,
        }
    }

    /// Reads type and network from the payload header and computes the
    /// hash under `generation_hash`.
    pub fn from_payload(
        payload: Vec<u8>,
        signer: Address,
        generation_hash: &[u8; HASH_LENGTH],
    ) -> Result<Self, DecodingError> {
        if payload.len() < TRANSACTION_HEADER_SIZE {
            return Err(DecodingError::invalid(
                "payload",
                format!("{} bytes is shorter than a header", payload.len()),
            ));
        }
        let network_byte = payload[SIGNABLE_OFFSET + 1];
        let network = NetworkType::from_u8(network_byte).ok_or_else(|| {
            DecodingError::invalid("payload.network", format!("unknown network 0x{network_byte:02X}"))
        })?;
        let code = u16::from_le_bytes([payload[SIGNABLE_OFFSET + 2], payload[SIGNABLE_OFFSET + 3]]);
        let transaction_type =
            TransactionType::try_from(code).map_err(|e| DecodingError::UnknownType(e.0))?;
        let hash = transaction_hash(&payload, generation_hash)
            .ok_or_else(|| DecodingError::invalid("payload", "truncated signable part"))?;

        Ok(Self::new(payload, hash, signer, transaction_type, network))
    }

    /// Uppercase hex of the payload, as submitted over REST.
    pub fn payload_hex(&self) -> String {
        hex::encode_upper(&self.payload)
    }
}

// ---------------------------------------------------------------------------
// Transport seam
// ---------------------------------------------------------------------------

/// The node's answer to a submit. Acceptance for processing only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnounceAck {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("node unreachable: {0}")]
    Unreachable(String),

    #[error("node rejected the request: {0}")]
    Rejected(String),
}

/// Submits payloads to a node.
#[async_trait]
pub trait TransactionAnnouncer: Send + Sync {
    async fn announce(&self, transaction: &SignedTransaction) -> Result<AnnounceAck, TransportError>;
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnounceError {
    /// The network reported a status error for this hash. Carried as is.
    #[error("submission failed: {0}")]
    SubmissionFailed(TransactionStatusError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Both event streams ended before a matching event arrived.
    #[error("listener closed before an outcome was observed")]
    ListenerClosed,

    /// A stream fell behind and was cut off before a matching event
    /// arrived on it.
    #[error("listener dropped events before an outcome was observed")]
    ListenerLagged,

    #[error("no outcome within {0:?}")]
    Timeout(Duration),
}

/// Terminal state of one announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnounceOutcome {
    Confirmed(Transaction),
    Failed(AnnounceError),
}

impl AnnounceOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    pub fn into_result(self) -> Result<Transaction, AnnounceError> {
        match self {
            Self::Confirmed(transaction) => Ok(transaction),
            Self::Failed(error) => Err(error),
        }
    }
}

// ---------------------------------------------------------------------------
// Announcer
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct Announcer {
    listener: Arc<dyn Listener>,
    transport: Arc<dyn TransactionAnnouncer>,
    default_timeout: Duration,
}

impl Announcer {
    pub fn new(listener: Arc<dyn Listener>, transport: Arc<dyn TransactionAnnouncer>) -> Self {
        Self {
            listener,
            transport,
            default_timeout: DEFAULT_ANNOUNCE_TIMEOUT,
        }
    }

    /// Announcer whose default timeout comes from `announce_timeout_ms`.
    pub fn from_config(
        listener: Arc<dyn Listener>,
        transport: Arc<dyn TransactionAnnouncer>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            default_timeout: config.announce_timeout(),
            ..Self::new(listener, transport)
        }
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Announces `transaction` and waits for its confirmation or rejection.
    ///
    /// No retry: a transport error or a status error ends the attempt.
    pub async fn announce(&self, transaction: &SignedTransaction) -> AnnounceOutcome {
        let outcome = self.race(transaction).await;
        log_outcome(transaction, &outcome);
        outcome
    }

    /// Like [`Announcer::announce`], giving up after `timeout`.
    pub async fn announce_with_timeout(
        &self,
        transaction: &SignedTransaction,
        timeout: Duration,
    ) -> AnnounceOutcome {
        let outcome = match tokio::time::timeout(timeout, self.race(transaction)).await {
            Ok(outcome) => outcome,
            Err(_) => AnnounceOutcome::Failed(AnnounceError::Timeout(timeout)),
        };
        log_outcome(transaction, &outcome);
        outcome
    }

    /// [`Announcer::announce_with_timeout`] with the configured default.
    pub async fn announce_with_default_timeout(
        &self,
        transaction: &SignedTransaction,
    ) -> AnnounceOutcome {
        self.announce_with_timeout(transaction, self.default_timeout).await
    }

    async fn race(&self, transaction: &SignedTransaction) -> AnnounceOutcome {
        let hash = transaction.hash.to_hex();
        let topic = Topic::transaction(transaction.signer, &transaction.hash);
        let mut confirmed = self.listener.confirmed(&topic).await;
        let mut status = self.listener.status(&topic).await;

        if let Err(e) = self.transport.announce(transaction).await {
            return AnnounceOutcome::Failed(AnnounceError::Transport(e));
        }

        let mut confirmed_open = true;
        let mut status_open = true;
        let first = loop {
            tokio::select! {
                event = next_for(&mut confirmed, &hash), if confirmed_open => match event {
                    Some(event) => break First::Confirmed(event),
                    None if confirmed.is_lagged() => {
                        return AnnounceOutcome::Failed(AnnounceError::ListenerLagged)
                    }
                    None => confirmed_open = false,
                },
                event = next_for(&mut status, &hash), if status_open => match event {
                    Some(event) => break First::Status(event),
                    None if status.is_lagged() => {
                        return AnnounceOutcome::Failed(AnnounceError::ListenerLagged)
                    }
                    None => status_open = false,
                },
                else => return AnnounceOutcome::Failed(AnnounceError::ListenerClosed),
            }
        };

        // The other stream may already hold an event published earlier.
        match first {
            First::Confirmed(tx) => match buffered_for(&mut status, &hash) {
                Some(rejection) if rejection.seq < tx.seq => rejected(rejection.event),
                _ => AnnounceOutcome::Confirmed(tx.event),
            },
            First::Status(rejection) => match buffered_for(&mut confirmed, &hash) {
                Some(tx) if tx.seq < rejection.seq => AnnounceOutcome::Confirmed(tx.event),
                _ => rejected(rejection.event),
            },
        }
    }
}

enum First {
    Confirmed(Sequenced<Transaction>),
    Status(Sequenced<TransactionStatusError>),
}

fn rejected(status: TransactionStatusError) -> AnnounceOutcome {
    AnnounceOutcome::Failed(AnnounceError::SubmissionFailed(status))
}

/// Waits for the next event concerning `hash`.
async fn next_for<T: TransactionEvent>(
    subscription: &mut Subscription<T>,
    hash: &str,
) -> Option<Sequenced<T>> {
    while let Some(item) = subscription.recv_sequenced().await {
        if item.event.concerns(hash) {
            return Some(item);
        }
    }
    None
}

/// The earliest buffered event concerning `hash`, without waiting.
fn buffered_for<T: TransactionEvent>(
    subscription: &mut Subscription<T>,
    hash: &str,
) -> Option<Sequenced<T>> {
    while let Some(item) = subscription.try_recv_sequenced() {
        if item.event.concerns(hash) {
            return Some(item);
        }
    }
    None
}

fn log_outcome(transaction: &SignedTransaction, outcome: &AnnounceOutcome) {
    let hash = transaction.hash.to_hex();
    match outcome {
        AnnounceOutcome::Confirmed(_) => {
            info!(%hash, signer = %transaction.signer, kind = %transaction.transaction_type, "transaction confirmed");
        }
        AnnounceOutcome::Failed(error) => {
            warn!(%hash, signer = %transaction.signer, error = %error, "announcement failed");
        }
    }
}
