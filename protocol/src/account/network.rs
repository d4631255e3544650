//! Network identifiers.
//!
//! The network byte is the first byte of every address and is written
//! into every transaction header, so a transaction built for one network
//! can never be replayed on another.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config;

/// The network a transaction or address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    /// Public main network.
    MainNet,
    /// Public test network.
    TestNet,
    /// Private network.
    Private,
    /// Private test network.
    PrivateTest,
    /// Legacy mijin network.
    Mijin,
    /// Legacy mijin test network.
    MijinTest,
}

impl NetworkType {
    /// Returns the on-chain network byte.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::MainNet => config::NETWORK_ID_MAINNET,
            Self::TestNet => config::NETWORK_ID_TESTNET,
            Self::Private => config::NETWORK_ID_PRIVATE,
            Self::PrivateTest => config::NETWORK_ID_PRIVATE_TEST,
            Self::Mijin => config::NETWORK_ID_MIJIN,
            Self::MijinTest => config::NETWORK_ID_MIJIN_TEST,
        }
    }

    /// Maps a network byte back to its variant. Unknown bytes yield `None`.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            config::NETWORK_ID_MAINNET => Some(Self::MainNet),
            config::NETWORK_ID_TESTNET => Some(Self::TestNet),
            config::NETWORK_ID_PRIVATE => Some(Self::Private),
            config::NETWORK_ID_PRIVATE_TEST => Some(Self::PrivateTest),
            config::NETWORK_ID_MIJIN => Some(Self::Mijin),
            config::NETWORK_ID_MIJIN_TEST => Some(Self::MijinTest),
            _ => None,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainNet => write!(f, "MainNet"),
            Self::TestNet => write!(f, "TestNet"),
            Self::Private => write!(f, "Private"),
            Self::PrivateTest => write!(f, "PrivateTest"),
            Self::Mijin => write!(f, "Mijin"),
            Self::MijinTest => write!(f, "MijinTest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_byte_roundtrip() {
        for network in [
            NetworkType::MainNet,
            NetworkType::TestNet,
            NetworkType::Private,
            NetworkType::PrivateTest,
            NetworkType::Mijin,
            NetworkType::MijinTest,
        ] {
            assert_eq!(NetworkType::from_u8(network.as_u8()), Some(network));
        }
    }

    #[test]
    fn unknown_network_byte() {
        assert_eq!(NetworkType::from_u8(0x00), None);
    }

    #[test]
    fn display_matches_serde_name() {
        let json = serde_json::to_string(&NetworkType::PrivateTest).unwrap();
        assert_eq!(json, format!("\"{}\"", NetworkType::PrivateTest));
    }
}
