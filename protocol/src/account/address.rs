//! Catapult addresses.
//!
//! An [`Address`] is always the 24 decoded bytes. The plain base32 form and
//! the encoded hex form are views computed on demand.
//!
//! The plain form is RFC 4648 base32 without padding: 192 bits encode to
//! 38 full characters plus one character carrying the last 2 bits.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::network::NetworkType;
use crate::config::{ADDRESS_ALIAS_FLAG, ADDRESS_LENGTH, PLAIN_ADDRESS_LENGTH};

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while parsing an address from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input has neither the plain nor the encoded length.
    #[error("invalid address length: {0} characters")]
    InvalidLength(usize),

    /// The encoded form is not valid hex.
    #[error("invalid address hex: {0}")]
    InvalidHex(String),

    /// The plain form contains a character outside the base32 alphabet.
    #[error("invalid base32 character '{0}' in address")]
    InvalidCharacter(char),

    /// The first byte has the alias flag set; this is a namespace id, not
    /// an address.
    #[error("encoded value is a namespace alias, not an address")]
    AliasFlagSet,
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A concrete, decoded 24-byte address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Wraps raw address bytes.
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses the 48-character hex form served by REST.
    ///
    /// Rejects values whose first byte carries the alias flag: those are
    /// unresolved namespace references and must go through
    /// [`UnresolvedAddress`](crate::transaction::UnresolvedAddress).
    pub fn from_encoded(encoded: &str) -> Result<Self, AddressError> {
        if encoded.len() != ADDRESS_LENGTH * 2 {
            return Err(AddressError::InvalidLength(encoded.len()));
        }
        let bytes = hex::decode(encoded).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        let mut raw = [0u8; ADDRESS_LENGTH];
        raw.copy_from_slice(&bytes);
        if raw[0] & ADDRESS_ALIAS_FLAG == ADDRESS_ALIAS_FLAG {
            return Err(AddressError::AliasFlagSet);
        }
        Ok(Self(raw))
    }

    /// Parses the plain base32 form. Dashes from the legacy "pretty" form
    /// are ignored and lowercase input is accepted.
    pub fn from_plain(plain: &str) -> Result<Self, AddressError> {
        let cleaned: String = plain
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if cleaned.len() != PLAIN_ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength(cleaned.len()));
        }

        let mut raw = [0u8; ADDRESS_LENGTH];
        let mut buffer: u32 = 0;
        let mut bits = 0u32;
        let mut written = 0usize;
        for c in cleaned.chars() {
            let value = BASE32_ALPHABET
                .iter()
                .position(|a| *a as char == c)
                .ok_or(AddressError::InvalidCharacter(c))? as u32;
            buffer = (buffer << 5) | value;
            bits += 5;
            if bits >= 8 {
                bits -= 8;
                if written < ADDRESS_LENGTH {
                    raw[written] = (buffer >> bits) as u8;
                    written += 1;
                }
                buffer &= (1 << bits) - 1;
            }
        }
        Ok(Self(raw))
    }

    /// Accepts either the plain or the encoded form, picked by length.
    pub fn parse(value: &str) -> Result<Self, AddressError> {
        if value.len() == ADDRESS_LENGTH * 2 {
            Self::from_encoded(value)
        } else {
            Self::from_plain(value)
        }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Uppercase hex form, as served by REST.
    pub fn encoded(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Plain base32 form.
    pub fn plain(&self) -> String {
        let mut out = String::with_capacity(PLAIN_ADDRESS_LENGTH);
        let mut buffer: u32 = 0;
        let mut bits = 0u32;
        for byte in self.0 {
            buffer = (buffer << 8) | byte as u32;
            bits += 8;
            while bits >= 5 {
                bits -= 5;
                out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1F) as usize] as char);
            }
            buffer &= (1 << bits) - 1;
        }
        if bits > 0 {
            out.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1F) as usize] as char);
        }
        out
    }

    /// The network this address belongs to, if the first byte is known.
    pub fn network(&self) -> Option<NetworkType> {
        NetworkType::from_u8(self.0[0])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.plain())
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.plain()
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODED: &str = "9050B9837EFAB4BBE8A4B9BB32D812F9885C00D8FC1650E1";
    const PLAIN: &str = "SBILTA367K2LX2FEXG5TFWAS7GEFYAGY7QLFBYI";

    #[test]
    fn encoded_to_plain() {
        let address = Address::from_encoded(ENCODED).unwrap();
        assert_eq!(address.plain(), PLAIN);
        assert_eq!(address.encoded(), ENCODED);
    }

    #[test]
    fn plain_to_encoded() {
        let address = Address::from_plain(PLAIN).unwrap();
        assert_eq!(address.encoded(), ENCODED);
    }

    #[test]
    fn second_known_vector() {
        let address = Address::from_plain("TDSSDPIPAJHVRZTQUAR36OQU6O7MV4BIAOLL5UA").unwrap();
        assert_eq!(address.encoded(), "98E521BD0F024F58E670A023BF3A14F3BECAF0280396BED0");
        assert_eq!(address.network(), Some(NetworkType::TestNet));
    }

    #[test]
    fn pretty_and_lowercase_are_accepted() {
        let pretty = "sbilta-367k2l-x2fexg-5tfwas-7gefya-gy7qlf-byi";
        assert_eq!(Address::from_plain(pretty).unwrap().plain(), PLAIN);
    }

    #[test]
    fn alias_flag_is_rejected() {
        let alias = "9151776168D24257D8000000000000000000000000000000";
        assert_eq!(Address::from_encoded(alias), Err(AddressError::AliasFlagSet));
    }

    #[test]
    fn bad_inputs() {
        assert!(matches!(Address::parse("ABC"), Err(AddressError::InvalidLength(3))));
        assert!(matches!(
            Address::from_plain("SBILTA367K2LX2FEXG5TFWAS7GEFYAGY7QLFBY1"),
            Err(AddressError::InvalidCharacter('1'))
        ));
        assert!(matches!(
            Address::from_encoded(&"ZZ".repeat(24)),
            Err(AddressError::InvalidHex(_))
        ));
    }

    #[test]
    fn serde_uses_plain_form() {
        let address = Address::from_encoded(ENCODED).unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", PLAIN));
        let recovered: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, address);
    }
}
