//! Fields shared by every transaction kind.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::time::Duration;

use crate::account::{NetworkType, PublicAccount, Signature};

// ---------------------------------------------------------------------------
// Deadline
// ---------------------------------------------------------------------------

/// Expiry of a transaction, in milliseconds since the network epoch.
///
/// The network epoch is a fixed offset from the Unix epoch, configured per
/// network (see [`ClientConfig::epoch_adjustment_secs`](crate::config::ClientConfig)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Deadline(pub u64);

impl Deadline {
    /// Builds a deadline `ttl` after `now`.
    pub fn after(now: DateTime<Utc>, ttl: Duration, epoch_adjustment_secs: u64) -> Option<Self> {
        let ttl = chrono::Duration::from_std(ttl).ok()?;
        Self::from_datetime(now.checked_add_signed(ttl)?, epoch_adjustment_secs)
    }

    /// Converts a wall-clock instant. `None` if it lies before the network
    /// epoch.
    pub fn from_datetime(instant: DateTime<Utc>, epoch_adjustment_secs: u64) -> Option<Self> {
        let epoch_ms = i64::try_from(epoch_adjustment_secs).ok()?.checked_mul(1000)?;
        let ms = instant.timestamp_millis().checked_sub(epoch_ms)?;
        u64::try_from(ms).ok().map(Self)
    }

    /// Wall-clock instant of this deadline.
    pub fn to_datetime(&self, epoch_adjustment_secs: u64) -> Option<DateTime<Utc>> {
        let epoch_ms = i64::try_from(epoch_adjustment_secs).ok()?.checked_mul(1000)?;
        let ms = i64::try_from(self.0).ok()?.checked_add(epoch_ms)?;
        Utc.timestamp_millis_opt(ms).single()
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Common header of a decoded transaction. Built once by the factory and
/// never recomputed from payload bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub network: NetworkType,
    pub version: u8,
    pub deadline: Deadline,
    /// Zero when the record leaves it unset.
    pub max_fee: u64,
    pub signature: Option<Signature>,
    pub signer: Option<PublicAccount>,
}

impl Envelope {
    /// The part of this envelope that an aggregate hands down to its
    /// inner transactions.
    pub fn inherited(&self) -> InheritedEnvelope {
        InheritedEnvelope {
            deadline: self.deadline,
            max_fee: self.max_fee,
            signature: self.signature,
        }
    }
}

/// Deadline, fee and signature of an aggregate, applied to each inner
/// transaction in place of whatever the inner record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InheritedEnvelope {
    pub deadline: Deadline,
    pub max_fee: u64,
    pub signature: Option<Signature>,
}

// ---------------------------------------------------------------------------
// TransactionInfo
// ---------------------------------------------------------------------------

/// Where a confirmed (or partially processed) transaction sits.
///
/// Records whose meta carries an aggregate hash or id describe an inner
/// transaction; everything else is standalone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TransactionInfo {
    #[serde(rename_all = "camelCase")]
    Standalone {
        height: u64,
        /// Zero-based position in the block.
        index: u32,
        id: Option<String>,
        hash: Option<String>,
        merkle_component_hash: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    AggregateInner {
        height: u64,
        /// Zero-based position inside the aggregate.
        index: u32,
        id: Option<String>,
        aggregate_hash: Option<String>,
        aggregate_id: Option<String>,
    },
}

impl TransactionInfo {
    pub fn height(&self) -> u64 {
        match self {
            Self::Standalone { height, .. } | Self::AggregateInner { height, .. } => *height,
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            Self::Standalone { index, .. } | Self::AggregateInner { index, .. } => *index,
        }
    }

    pub fn is_aggregate_inner(&self) -> bool {
        matches!(self, Self::AggregateInner { .. })
    }
}
