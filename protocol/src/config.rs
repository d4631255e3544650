//! # Protocol Configuration & Constants
//!
//! Every magic number the client needs to talk to a catapult-style network
//! lives here: network identifiers, binary layout sizes, alias flags, and
//! the defaults for [`ClientConfig`].
//!
//! The layout constants must match the chain's serializer byte for byte.
//! Changing one of them silently breaks every transaction hash we compute,
//! so treat this file as consensus-critical.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::account::NetworkType;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Public main network.
pub const NETWORK_ID_MAINNET: u8 = 0x68;

/// Public test network.
pub const NETWORK_ID_TESTNET: u8 = 0x98;

/// Private network.
pub const NETWORK_ID_PRIVATE: u8 = 0x78;

/// Private test network.
pub const NETWORK_ID_PRIVATE_TEST: u8 = 0x80;

/// Legacy mijin network, still served by older gateways.
pub const NETWORK_ID_MIJIN: u8 = 0x60;

/// Legacy mijin test network.
pub const NETWORK_ID_MIJIN_TEST: u8 = 0x90;

// ---------------------------------------------------------------------------
// Binary Layout
// ---------------------------------------------------------------------------

/// Size of an encoded address in bytes (network byte + 20 byte hash +
/// 3 byte checksum). Unresolved addresses use the same width.
pub const ADDRESS_LENGTH: usize = 24;

/// Length of a plain (base32, unpadded) address string.
pub const PLAIN_ADDRESS_LENGTH: usize = 39;

/// Ed25519 public key length.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Hash length for SHA3-256 digests (transaction hashes, secrets).
pub const HASH_LENGTH: usize = 32;

/// Header of a top-level transaction:
/// size(4) + reserved(4) + signature(64) + signer(32) + reserved(4)
/// + version(1) + network(1) + type(2) + max_fee(8) + deadline(8).
pub const TRANSACTION_HEADER_SIZE: usize = 128;

/// Header of an embedded (aggregate inner) transaction:
/// size(4) + reserved(4) + signer(32) + reserved(4) + version(1)
/// + network(1) + type(2).
pub const EMBEDDED_HEADER_SIZE: usize = 48;

/// Offset where the signed part of a top-level payload starts
/// (everything before it is size, signature, signer and padding).
pub const SIGNABLE_OFFSET: usize = 108;

/// Number of signable bytes of an aggregate: the header tail
/// (version, network, type, fee, deadline = 20) plus the 32 byte
/// transactions hash. Inner transactions are covered by that hash.
pub const AGGREGATE_SIGNABLE_LENGTH: usize = 52;

/// Encoded cosignature: version(8) + signer(32) + signature(64).
pub const COSIGNATURE_SIZE: usize = 104;

/// Embedded transactions inside an aggregate are aligned to this boundary.
pub const EMBEDDED_ALIGNMENT: usize = 8;

// ---------------------------------------------------------------------------
// Alias Flags
// ---------------------------------------------------------------------------

/// Bit 0 of the first byte of an encoded unresolved address marks a
/// namespace alias (e.g. `0x91` instead of `0x90`).
pub const ADDRESS_ALIAS_FLAG: u8 = 0x01;

/// Most significant bit of an unresolved mosaic id marks a namespace alias.
pub const MOSAIC_ALIAS_FLAG: u64 = 1 << 63;

// ---------------------------------------------------------------------------
// Listener Defaults
// ---------------------------------------------------------------------------

/// Per-subscription buffer. A subscriber that falls this far behind gets
/// its oldest events dropped by the hub.
pub const DEFAULT_LISTENER_CHANNEL_CAPACITY: usize = 64;

/// Suggested upper bound for awaiting an announce outcome. The network
/// enforces the transaction deadline on its own; this only stops the
/// client from waiting forever on a silent node.
pub const DEFAULT_ANNOUNCE_TIMEOUT: Duration = Duration::from_secs(120);

/// Seconds between the Unix epoch and the public network epoch.
/// Deadlines on the wire are milliseconds relative to the network epoch.
pub const DEFAULT_EPOCH_ADJUSTMENT_SECS: u64 = 1_615_853_185;

// ---------------------------------------------------------------------------
// Client Configuration
// ---------------------------------------------------------------------------

/// Runtime configuration for a client talking to one network.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```json
/// { "network": "TestNet", "generation_hash": "49D6E1CE..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Network the client is bound to.
    pub network: NetworkType,
    /// Hex-encoded generation hash seed, mixed into every transaction hash.
    pub generation_hash: String,
    /// Network epoch offset from the Unix epoch, in seconds.
    pub epoch_adjustment_secs: u64,
    /// Buffer size for each listener subscription.
    pub listener_channel_capacity: usize,
    /// Timeout applied by callers that use the announce timeout helper.
    pub announce_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: NetworkType::TestNet,
            generation_hash: String::new(),
            epoch_adjustment_secs: DEFAULT_EPOCH_ADJUSTMENT_SECS,
            listener_channel_capacity: DEFAULT_LISTENER_CHANNEL_CAPACITY,
            announce_timeout_ms: DEFAULT_ANNOUNCE_TIMEOUT.as_millis() as u64,
        }
    }
}

impl ClientConfig {
    /// Returns the announce timeout as a [`Duration`].
    pub fn announce_timeout(&self) -> Duration {
        Duration::from_millis(self.announce_timeout_ms)
    }

    /// Decodes the configured generation hash. Returns `None` when the
    /// field is empty or not 32 bytes of valid hex.
    pub fn generation_hash_bytes(&self) -> Option<[u8; HASH_LENGTH]> {
        let bytes = hex::decode(&self.generation_hash).ok()?;
        bytes.try_into().ok()
    }
}

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------

/// Returns a friendly name for a network identifier, mainly for logging.
pub fn network_name(network_id: u8) -> String {
    match NetworkType::from_u8(network_id) {
        Some(network) => network.to_string(),
        None => format!("unknown(0x{:02X})", network_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_ids_are_distinct() {
        let ids = [
            NETWORK_ID_MAINNET,
            NETWORK_ID_TESTNET,
            NETWORK_ID_PRIVATE,
            NETWORK_ID_PRIVATE_TEST,
            NETWORK_ID_MIJIN,
            NETWORK_ID_MIJIN_TEST,
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_network_ids_never_carry_alias_flag() {
        // An address whose network byte had bit 0 set would be read back
        // as a namespace alias.
        for id in [NETWORK_ID_MAINNET, NETWORK_ID_TESTNET, NETWORK_ID_MIJIN_TEST] {
            assert_eq!(id & ADDRESS_ALIAS_FLAG, 0);
        }
    }

    #[test]
    fn test_header_layout_sums() {
        assert_eq!(4 + 4 + SIGNATURE_LENGTH + PUBLIC_KEY_LENGTH + 4, SIGNABLE_OFFSET);
        assert_eq!(SIGNABLE_OFFSET + 1 + 1 + 2 + 8 + 8, TRANSACTION_HEADER_SIZE);
        assert_eq!(4 + 4 + PUBLIC_KEY_LENGTH + 4 + 1 + 1 + 2, EMBEDDED_HEADER_SIZE);
        assert_eq!(8 + PUBLIC_KEY_LENGTH + SIGNATURE_LENGTH, COSIGNATURE_SIZE);
    }

    #[test]
    fn test_network_name_formatting() {
        assert_eq!(network_name(NETWORK_ID_TESTNET), "TestNet");
        assert_eq!(network_name(0x01), "unknown(0x01)");
    }

    #[test]
    fn test_client_config_partial_json() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "network": "MainNet" }"#).unwrap();
        assert_eq!(config.network, NetworkType::MainNet);
        assert_eq!(config.listener_channel_capacity, DEFAULT_LISTENER_CHANNEL_CAPACITY);
        assert_eq!(config.announce_timeout(), DEFAULT_ANNOUNCE_TIMEOUT);
    }

    #[test]
    fn test_generation_hash_bytes() {
        let mut config = ClientConfig::default();
        assert!(config.generation_hash_bytes().is_none());

        config.generation_hash = "AB".repeat(32);
        assert_eq!(config.generation_hash_bytes(), Some([0xAB; 32]));

        config.generation_hash = "ABCD".to_string();
        assert!(config.generation_hash_bytes().is_none());
    }
}
