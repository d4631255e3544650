//! # Network Module
//!
//! Announcing transactions and observing their outcome.
//!
//! ## Architecture
//!
//! ```text
//! subscriptions.rs  SubscriptionRegistry (DashMap of live slots) and the RAII guard
//! listener.rs       Listener seam, Subscription stream, in-process ListenerHub
//! announcer.rs      Announcer: subscribe, submit, race confirmed vs. status
//! ```
//!
//! ## Design Decisions
//!
//! - The registry is handed to the hub as an `Arc` instead of living in a
//!   global. Tests and callers each own their registry.
//! - Every announcement gets its own pair of subscriptions, even for the
//!   same signer. Releasing one pair never touches another.
//! - Publishing never blocks. A subscriber whose buffer is full is closed
//!   and flagged as lagged rather than silently skipping events.
//! - Events are stamped with a registry-wide sequence number, so the
//!   announcer can tell which of two buffered outcomes came first.

pub mod announcer;
pub mod listener;
pub mod subscriptions;

pub use announcer::{
    AnnounceAck, AnnounceError, AnnounceOutcome, Announcer, SignedTransaction,
    TransactionAnnouncer, TransportError,
};
pub use listener::{Listener, ListenerHub, Subscription, TransactionEvent, TransactionStatusError};
pub use subscriptions::{
    Channel, Registration, Sequenced, SubscriptionGuard, SubscriptionId, SubscriptionRegistry,
    Topic,
};
