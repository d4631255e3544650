//! Listener seam and the in-process hub that implements it.

use std::fmt;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use super::subscriptions::{
    Registration, Sequenced, SubscriptionGuard, SubscriptionId, SubscriptionRegistry, Topic,
};
use crate::account::Address;
use crate::config::ClientConfig;
use crate::transaction::factory::{numeric_u64, required, string};
use crate::transaction::{Deadline, DecodingError, Transaction};

/// An event that names the transaction it concerns.
pub trait TransactionEvent: Clone + Send + 'static {
    /// Hex hash of the transaction, if the event carries one.
    fn event_hash(&self) -> Option<&str>;

    fn concerns(&self, hash: &str) -> bool {
        self.event_hash().is_some_and(|h| h.eq_ignore_ascii_case(hash))
    }
}

impl TransactionEvent for Transaction {
    fn event_hash(&self) -> Option<&str> {
        self.hash()
    }
}

impl TransactionEvent for TransactionStatusError {
    fn event_hash(&self) -> Option<&str> {
        Some(&self.hash)
    }
}

/// A rejection reported by the network for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionStatusError {
    pub hash: String,
    /// Validation result code, e.g. `Failure_Core_Insufficient_Balance`.
    pub code: String,
    pub deadline: Deadline,
}

impl TransactionStatusError {
    /// Reads the status channel payload `{ hash, code, deadline }`.
    pub fn from_json(value: &Value) -> Result<Self, DecodingError> {
        Ok(Self {
            hash: string(required(value, "hash")?, "hash")?.to_string(),
            code: string(required(value, "code")?, "code")?.to_string(),
            deadline: Deadline(numeric_u64(required(value, "deadline")?, "deadline")?),
        })
    }

    pub fn matches(&self, hash: &str) -> bool {
        self.hash.eq_ignore_ascii_case(hash)
    }
}

impl fmt::Display for TransactionStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transaction {} rejected: {}", self.hash, self.code)
    }
}

/// A live event stream. Dropping it releases its registry slot.
pub struct Subscription<T> {
    receiver: mpsc::Receiver<Sequenced<T>>,
    lagged: Arc<AtomicBool>,
    guard: SubscriptionGuard,
}

impl<T> Subscription<T> {
    pub fn new(
        receiver: mpsc::Receiver<Sequenced<T>>,
        lagged: Arc<AtomicBool>,
        guard: SubscriptionGuard,
    ) -> Self {
        Self {
            receiver,
            lagged,
            guard,
        }
    }

    fn from_registration(registration: Registration<T>, registry: Arc<SubscriptionRegistry>) -> Self {
        let guard = SubscriptionGuard::new(registration.id, registry);
        Self::new(registration.receiver, registration.lagged, guard)
    }

    pub fn id(&self) -> SubscriptionId {
        self.guard.id()
    }

    /// Whether the stream was cut short because this subscriber fell
    /// behind. Events published after that point were not delivered.
    pub fn is_lagged(&self) -> bool {
        self.lagged.load(Ordering::SeqCst)
    }

    /// Next event, or `None` once the listener side has closed.
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await.map(|item| item.event)
    }

    /// Next event with its publish sequence number.
    pub async fn recv_sequenced(&mut self) -> Option<Sequenced<T>> {
        self.receiver.recv().await
    }

    /// An already buffered event, without waiting.
    pub fn try_recv_sequenced(&mut self) -> Option<Sequenced<T>> {
        self.receiver.try_recv().ok()
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut()
            .receiver
            .poll_recv(cx)
            .map(|item| item.map(|item| item.event))
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("guard", &self.guard).finish()
    }
}

/// Source of confirmation and status events.
///
/// An implementation may deliver events outside a topic's hash; consumers
/// still check the hash of what they receive.
#[async_trait]
pub trait Listener: Send + Sync {
    /// Transactions confirmed under `topic`.
    async fn confirmed(&self, topic: &Topic) -> Subscription<Transaction>;

    /// Rejections reported under `topic`.
    async fn status(&self, topic: &Topic) -> Subscription<TransactionStatusError>;
}

// ---------------------------------------------------------------------------
// ListenerHub
// ---------------------------------------------------------------------------

/// In-process [`Listener`]. Whatever receives node events (a websocket
/// client, a test) feeds them in through the `publish_*` methods.
#[derive(Clone)]
pub struct ListenerHub {
    registry: Arc<SubscriptionRegistry>,
}

impl ListenerHub {
    pub fn new(registry: Arc<SubscriptionRegistry>) -> Self {
        Self { registry }
    }

    /// Hub over a fresh registry sized by the configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(Arc::new(SubscriptionRegistry::from_config(config)))
    }

    pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
        &self.registry
    }

    /// Returns how many subscriptions received the event.
    pub fn publish_confirmed(&self, address: &Address, transaction: &Transaction) -> usize {
        self.registry.send_confirmed(address, transaction)
    }

    /// Returns how many subscriptions received the event.
    pub fn publish_status(&self, address: &Address, status: &TransactionStatusError) -> usize {
        self.registry.send_status(address, status)
    }

    /// Ends every open stream, as a dropped connection would.
    pub fn close(&self) {
        self.registry.clear();
    }
}

#[async_trait]
impl Listener for ListenerHub {
    async fn confirmed(&self, topic: &Topic) -> Subscription<Transaction> {
        let registration = self.registry.register_confirmed(topic.clone());
        Subscription::from_registration(registration, self.registry.clone())
    }

    async fn status(&self, topic: &Topic) -> Subscription<TransactionStatusError> {
        let registration = self.registry.register_status(topic.clone());
        Subscription::from_registration(registration, self.registry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{decode, fixtures};
    use serde_json::json;

    fn signer() -> Address {
        Address::from_encoded(fixtures::ADDRESS).unwrap()
    }

    fn topic() -> Topic {
        Topic::address(signer())
    }

    #[test]
    fn test_status_from_json() {
        let status = TransactionStatusError::from_json(&json!({
            "hash": "AB".repeat(32),
            "code": "Failure_Core_Insufficient_Balance",
            "deadline": "7200000",
        }))
        .unwrap();
        assert_eq!(status.code, "Failure_Core_Insufficient_Balance");
        assert_eq!(status.deadline, Deadline(7_200_000));
        assert!(status.matches(&"ab".repeat(32)));
    }

    #[test]
    fn test_status_from_json_missing_code() {
        let err = TransactionStatusError::from_json(&json!({ "hash": "AB", "deadline": "1" }));
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_hub_delivers_confirmed() {
        let hub = ListenerHub::new(Arc::new(SubscriptionRegistry::default()));
        let mut sub = hub.confirmed(&topic()).await;
        let tx = decode(&fixtures::transfer_record()).unwrap();

        assert_eq!(hub.publish_confirmed(&signer(), &tx), 1);
        assert_eq!(sub.recv().await, Some(tx));
    }

    #[tokio::test]
    async fn test_dropping_subscription_releases_slot() {
        let hub = ListenerHub::new(Arc::new(SubscriptionRegistry::default()));
        let sub = hub.status(&topic()).await;
        let id = sub.id();
        assert!(hub.registry().contains(id));
        drop(sub);
        assert!(hub.registry().is_empty());
    }

    #[tokio::test]
    async fn test_transaction_topic_filters_confirmations() {
        let hub = ListenerHub::from_config(&ClientConfig::default());
        let ours = decode(&fixtures::transfer_record()).unwrap();
        let mut other_record = fixtures::transfer_record();
        other_record["meta"]["hash"] = json!("EE".repeat(32));
        let other = decode(&other_record).unwrap();

        let hash = crate::account::Hash256::from_hex(ours.hash().unwrap()).unwrap();
        let mut sub = hub.confirmed(&Topic::transaction(signer(), &hash)).await;

        assert_eq!(hub.publish_confirmed(&signer(), &other), 0);
        assert_eq!(hub.publish_confirmed(&signer(), &ours), 1);
        assert_eq!(sub.recv().await, Some(ours));
        assert!(!sub.is_lagged());
    }

    #[tokio::test]
    async fn test_lagging_subscription_is_flagged() {
        let config = ClientConfig {
            listener_channel_capacity: 1,
            ..ClientConfig::default()
        };
        let hub = ListenerHub::from_config(&config);
        let mut sub = hub.status(&topic()).await;
        let status = TransactionStatusError {
            hash: "AB".repeat(32),
            code: "Failure_Core_Past_Deadline".into(),
            deadline: Deadline(1),
        };

        hub.publish_status(&signer(), &status);
        hub.publish_status(&signer(), &status);

        assert!(sub.is_lagged());
        assert_eq!(sub.recv().await, Some(status));
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn test_subscription_is_a_stream() {
        use tokio_stream::StreamExt;

        let hub = ListenerHub::new(Arc::new(SubscriptionRegistry::default()));
        let sub = hub.confirmed(&topic()).await;
        let tx = decode(&fixtures::transfer_record()).unwrap();
        hub.publish_confirmed(&signer(), &tx);
        hub.publish_confirmed(&signer(), &tx);

        let received: Vec<Transaction> = sub.take(2).collect().await;
        assert_eq!(received, vec![tx.clone(), tx]);
    }

    #[tokio::test]
    async fn test_close_ends_streams() {
        let hub = ListenerHub::new(Arc::new(SubscriptionRegistry::default()));
        let mut sub = hub.status(&topic()).await;
        hub.close();
        assert_eq!(sub.recv().await, None);
    }
}
