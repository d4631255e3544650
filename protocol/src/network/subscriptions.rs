//! Registry of live listener subscriptions.
//!
//! Every subscription owns one slot, keyed by a fresh [`SubscriptionId`].
//! The slot holds the sending half of a bounded channel plus the [`Topic`]
//! it is scoped to. Removing the slot drops the sender, which ends the
//! receiving stream.
//!
//! Each published event is stamped with a registry-wide sequence number,
//! so a consumer holding several subscriptions can tell which of two
//! buffered events was published first.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::account::{Address, Hash256};
use crate::config::{ClientConfig, DEFAULT_LISTENER_CHANNEL_CAPACITY};
use crate::transaction::Transaction;

use super::listener::{TransactionEvent, TransactionStatusError};

/// Identifier of one subscription. Never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// The event stream a subscription listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Confirmed,
    Status,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmedAdded"),
            Self::Status => write!(f, "status"),
        }
    }
}

/// Which events a subscription receives: everything for an address, or
/// only the events concerning one transaction of that address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    address: Address,
    hash: Option<String>,
}

impl Topic {
    pub fn address(address: Address) -> Self {
        Self {
            address,
            hash: None,
        }
    }

    pub fn transaction(address: Address, hash: &Hash256) -> Self {
        Self {
            address,
            hash: Some(hash.to_hex()),
        }
    }

    pub fn signer(&self) -> &Address {
        &self.address
    }

    /// Uppercase hex of the transaction hash, when scoped to one.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn accepts<E: TransactionEvent>(&self, address: &Address, event: &E) -> bool {
        self.address == *address && self.hash.as_deref().map_or(true, |h| event.concerns(h))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hash {
            Some(hash) => write!(f, "{}/{}", self.address, hash),
            None => write!(f, "{}", self.address),
        }
    }
}

/// An event with its position in the registry's publish order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequenced<T> {
    pub seq: u64,
    pub event: T,
}

/// Receiving side of a freshly registered slot.
#[derive(Debug)]
pub struct Registration<T> {
    pub id: SubscriptionId,
    pub receiver: mpsc::Receiver<Sequenced<T>>,
    /// Set when the slot was closed because its buffer overflowed.
    pub lagged: Arc<AtomicBool>,
}

enum Sink {
    Confirmed(mpsc::Sender<Sequenced<Transaction>>),
    Status(mpsc::Sender<Sequenced<TransactionStatusError>>),
}

struct Slot {
    topic: Topic,
    sink: Sink,
    lagged: Arc<AtomicBool>,
}

type Target<T> = (SubscriptionId, mpsc::Sender<Sequenced<T>>, Arc<AtomicBool>);

/// Concurrent table of subscriptions.
pub struct SubscriptionRegistry {
    next_id: AtomicU64,
    sequence: AtomicU64,
    slots: DashMap<SubscriptionId, Slot>,
    capacity: usize,
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_LISTENER_CHANNEL_CAPACITY)
    }
}

impl SubscriptionRegistry {
    /// Creates an empty registry whose channels buffer `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            sequence: AtomicU64::new(0),
            slots: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Registry sized by `listener_channel_capacity`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.listener_channel_capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn insert(&self, topic: Topic, sink: Sink, channel: Channel) -> (SubscriptionId, Arc<AtomicBool>) {
        let id = self.next_id();
        let lagged = Arc::new(AtomicBool::new(false));
        debug!(%id, %topic, %channel, "subscription registered");
        self.slots.insert(
            id,
            Slot {
                topic,
                sink,
                lagged: lagged.clone(),
            },
        );
        (id, lagged)
    }

    pub fn register_confirmed(&self, topic: Topic) -> Registration<Transaction> {
        let (tx, receiver) = mpsc::channel(self.capacity);
        let (id, lagged) = self.insert(topic, Sink::Confirmed(tx), Channel::Confirmed);
        Registration {
            id,
            receiver,
            lagged,
        }
    }

    pub fn register_status(&self, topic: Topic) -> Registration<TransactionStatusError> {
        let (tx, receiver) = mpsc::channel(self.capacity);
        let (id, lagged) = self.insert(topic, Sink::Status(tx), Channel::Status);
        Registration {
            id,
            receiver,
            lagged,
        }
    }

    /// Removes a slot. Returns false if it was already gone.
    pub fn release(&self, id: SubscriptionId) -> bool {
        let removed = self.slots.remove(&id).is_some();
        if removed {
            debug!(%id, "subscription released");
        }
        removed
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drops every slot, ending all streams.
    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Delivers a confirmed transaction to every confirmed subscription
    /// whose topic accepts it. Returns the number of subscriptions reached.
    pub fn send_confirmed(&self, address: &Address, transaction: &Transaction) -> usize {
        let targets: Vec<Target<Transaction>> = self
            .slots
            .iter()
            .filter(|slot| slot.topic.accepts(address, transaction))
            .filter_map(|slot| match &slot.sink {
                Sink::Confirmed(tx) => Some((*slot.key(), tx.clone(), slot.lagged.clone())),
                Sink::Status(_) => None,
            })
            .collect();
        self.deliver(targets, transaction)
    }

    /// Delivers a status error to every status subscription whose topic
    /// accepts it.
    pub fn send_status(&self, address: &Address, status: &TransactionStatusError) -> usize {
        let targets: Vec<Target<TransactionStatusError>> = self
            .slots
            .iter()
            .filter(|slot| slot.topic.accepts(address, status))
            .filter_map(|slot| match &slot.sink {
                Sink::Status(tx) => Some((*slot.key(), tx.clone(), slot.lagged.clone())),
                Sink::Confirmed(_) => None,
            })
            .collect();
        self.deliver(targets, status)
    }

    // Targets are cloned out first so no shard lock is held while sending.
    // A full buffer closes the subscription and flags it as lagged; the
    // consumer drains what was buffered and then sees the stream end.
    fn deliver<T: Clone>(&self, targets: Vec<Target<T>>, event: &T) -> usize {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let mut delivered = 0;
        for (id, sender, lagged) in targets {
            let item = Sequenced {
                seq,
                event: event.clone(),
            };
            match sender.try_send(item) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(%id, capacity = self.capacity, "subscriber lagging, subscription closed");
                    lagged.store(true, Ordering::SeqCst);
                    self.release(id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {}
            }
        }
        delivered
    }
}

// ---------------------------------------------------------------------------
// Guard
// ---------------------------------------------------------------------------

/// Releases one registry slot when dropped.
///
/// Release happens at most once, whether through [`SubscriptionGuard::release`]
/// or drop.
pub struct SubscriptionGuard {
    id: SubscriptionId,
    registry: Option<Arc<SubscriptionRegistry>>,
}

impl SubscriptionGuard {
    pub fn new(id: SubscriptionId, registry: Arc<SubscriptionRegistry>) -> Self {
        Self {
            id,
            registry: Some(registry),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Releases now. Later calls and the eventual drop do nothing.
    pub fn release(&mut self) {
        if let Some(registry) = self.registry.take() {
            registry.release(self.id);
        }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionGuard")
            .field("id", &self.id)
            .field("released", &self.registry.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(byte: u8) -> Address {
        let mut raw = [byte; 24];
        raw[0] = 0x98;
        Address::from_bytes(raw)
    }

    fn status(hash: &str) -> TransactionStatusError {
        TransactionStatusError {
            hash: hash.to_string(),
            code: "Failure_Core_Past_Deadline".into(),
            deadline: crate::transaction::Deadline(1),
        }
    }

    #[test]
    fn test_ids_are_distinct() {
        let registry = SubscriptionRegistry::default();
        let a = registry.register_confirmed(Topic::address(address(1)));
        let b = registry.register_confirmed(Topic::address(address(1)));
        assert_ne!(a.id, b.id);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_capacity_from_config() {
        let config = ClientConfig {
            listener_channel_capacity: 7,
            ..ClientConfig::default()
        };
        assert_eq!(SubscriptionRegistry::from_config(&config).capacity(), 7);
    }

    #[test]
    fn test_guard_releases_once() {
        let registry = Arc::new(SubscriptionRegistry::default());
        let id = registry.register_status(Topic::address(address(1))).id;
        let mut guard = SubscriptionGuard::new(id, registry.clone());

        guard.release();
        assert!(!registry.contains(id));
        guard.release();
        drop(guard);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_dropping_one_guard_keeps_the_other() {
        let registry = Arc::new(SubscriptionRegistry::default());
        let a = registry.register_status(Topic::address(address(1))).id;
        let b = registry.register_status(Topic::address(address(1))).id;
        let guard_a = SubscriptionGuard::new(a, registry.clone());
        let _guard_b = SubscriptionGuard::new(b, registry.clone());

        drop(guard_a);
        assert!(!registry.contains(a));
        assert!(registry.contains(b));
    }

    #[tokio::test]
    async fn test_release_ends_stream() {
        let registry = SubscriptionRegistry::default();
        let mut sub = registry.register_status(Topic::address(address(1)));
        registry.release(sub.id);
        assert!(sub.receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_status_scoped_by_address_and_channel() {
        let registry = SubscriptionRegistry::default();
        let mut ours = registry.register_status(Topic::address(address(1)));
        let mut theirs = registry.register_status(Topic::address(address(2)));
        let _confirmed = registry.register_confirmed(Topic::address(address(1)));

        let event = status(&"AA".repeat(32));
        assert_eq!(registry.send_status(&address(1), &event), 1);
        assert_eq!(ours.receiver.recv().await.map(|e| e.event), Some(event));
        assert!(theirs.receiver.try_recv().is_err());
    }

    #[test]
    fn test_transaction_topic_skips_other_hashes() {
        let registry = SubscriptionRegistry::new(1);
        let ours = Hash256::from_bytes([0xAA; 32]);
        let mut sub = registry.register_status(Topic::transaction(address(1), &ours));

        for _ in 0..10 {
            assert_eq!(registry.send_status(&address(1), &status(&"BB".repeat(32))), 0);
        }
        assert_eq!(registry.send_status(&address(1), &status(&"aa".repeat(32))), 1);
        assert!(!sub.lagged.load(Ordering::SeqCst));
        assert_eq!(sub.receiver.try_recv().unwrap().event.hash, "aa".repeat(32));
    }

    #[test]
    fn test_events_carry_publish_order() {
        let registry = SubscriptionRegistry::default();
        let mut first_sub = registry.register_status(Topic::address(address(1)));
        let mut second_sub = registry.register_status(Topic::address(address(1)));

        registry.send_status(&address(1), &status(&"01".repeat(32)));
        registry.send_status(&address(1), &status(&"02".repeat(32)));

        let first = first_sub.receiver.try_recv().unwrap();
        let second = first_sub.receiver.try_recv().unwrap();
        assert!(first.seq < second.seq);
        assert_eq!(second_sub.receiver.try_recv().unwrap().seq, first.seq);
    }

    #[tokio::test]
    async fn test_full_channel_closes_and_flags_lag() {
        let registry = SubscriptionRegistry::new(1);
        let mut sub = registry.register_status(Topic::address(address(1)));
        let event = status(&"AA".repeat(32));

        assert_eq!(registry.send_status(&address(1), &event), 1);
        assert_eq!(registry.send_status(&address(1), &event), 0);

        assert!(sub.lagged.load(Ordering::SeqCst));
        assert!(!registry.contains(sub.id));
        // What was buffered is still delivered, then the stream ends.
        assert!(sub.receiver.recv().await.is_some());
        assert!(sub.receiver.recv().await.is_none());
    }
}
