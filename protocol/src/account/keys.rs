//! Fixed-width byte values carried by transactions: public keys,
//! signatures and 32-byte hashes.
//!
//! All of them travel as uppercase hex on the wire and serialize the same
//! way. They are opaque here; nothing in this crate signs or verifies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::network::NetworkType;
use crate::config::{HASH_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Error returned when a hex string does not decode to the expected width.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected} bytes of hex, got {input:?}")]
pub struct InvalidHexLength {
    /// Number of bytes the target type holds.
    pub expected: usize,
    /// The rejected input.
    pub input: String,
}

macro_rules! hex_bytes_type {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name([u8; $len]);

        impl $name {
            /// Wraps raw bytes.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Returns the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Parses a hex string of exactly the right width. Case is
            /// ignored.
            pub fn from_hex(value: &str) -> Result<Self, InvalidHexLength> {
                let invalid = || InvalidHexLength {
                    expected: $len,
                    input: value.to_string(),
                };
                let bytes = hex::decode(value).map_err(|_| invalid())?;
                let raw: [u8; $len] = bytes.try_into().map_err(|_| invalid())?;
                Ok(Self(raw))
            }

            /// Uppercase hex form.
            pub fn to_hex(&self) -> String {
                hex::encode_upper(self.0)
            }

            /// True when every byte is zero (the "unsigned" placeholder).
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = InvalidHexLength;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_hex()
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidHexLength;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_hex(&value)
            }
        }
    };
}

hex_bytes_type!(
    /// An Ed25519 public key.
    PublicKey,
    PUBLIC_KEY_LENGTH
);

hex_bytes_type!(
    /// An Ed25519 signature.
    Signature,
    SIGNATURE_LENGTH
);

hex_bytes_type!(
    /// A SHA3-256 digest: transaction hashes, lock hashes, secrets.
    Hash256,
    HASH_LENGTH
);

/// A public key bound to the network it signs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub public_key: PublicKey,
    pub network: NetworkType,
}

impl PublicAccount {
    pub fn new(public_key: PublicKey, network: NetworkType) -> Self {
        Self {
            public_key,
            network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "9801508C58666C746F471538E43002B85B1CD542F9874B2861183919BA8787B6";

    #[test]
    fn public_key_hex_is_case_insensitive() {
        let upper = PublicKey::from_hex(KEY).unwrap();
        let lower = PublicKey::from_hex(&KEY.to_lowercase()).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.to_hex(), KEY);
    }

    #[test]
    fn wrong_width_is_rejected() {
        let err = Signature::from_hex(KEY).unwrap_err();
        assert_eq!(err.expected, SIGNATURE_LENGTH);
        assert!(Hash256::from_hex("XYZ").is_err());
    }

    #[test]
    fn zero_placeholder() {
        assert!(Signature::from_bytes([0u8; SIGNATURE_LENGTH]).is_zero());
        assert!(!PublicKey::from_hex(KEY).unwrap().is_zero());
    }

    #[test]
    fn public_account_serializes_key_as_hex() {
        let account = PublicAccount::new(PublicKey::from_hex(KEY).unwrap(), NetworkType::TestNet);
        let json = serde_json::to_value(account).unwrap();
        assert_eq!(json["publicKey"], KEY);
        assert_eq!(json["network"], "TestNet");
    }
}
