//! Mosaic and namespace identifiers, and the unresolved forms that may
//! stand in for an address or a mosaic id until the block resolves them.
//!
//! Both unresolved forms use a flag to tell the placeholder apart from the
//! concrete value:
//!
//! - an unresolved **address** is 24 bytes; bit 0 of the first byte set
//!   means bytes `1..9` hold a little-endian namespace id,
//! - an unresolved **mosaic id** is a `u64`; the most significant bit set
//!   means the value is a namespace id.

use serde::Serialize;
use std::fmt;

use crate::account::{Address, AddressError, NetworkType};
use crate::config::{ADDRESS_ALIAS_FLAG, ADDRESS_LENGTH, MOSAIC_ALIAS_FLAG};

/// Parses a big-endian hex `u64` (up to 16 digits), as REST serves ids.
pub(crate) fn parse_hex_u64(value: &str) -> Option<u64> {
    if value.is_empty() || value.len() > 16 {
        return None;
    }
    u64::from_str_radix(value, 16).ok()
}

// ---------------------------------------------------------------------------
// Concrete ids
// ---------------------------------------------------------------------------

/// A concrete mosaic id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct MosaicId(pub u64);

/// A namespace id. Also used as the placeholder for an aliased address or
/// mosaic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct NamespaceId(pub u64);

macro_rules! hex_id {
    ($name:ident) => {
        impl $name {
            /// Parses the 16-digit hex form.
            pub fn from_hex(value: &str) -> Option<Self> {
                parse_hex_u64(value).map(Self)
            }

            /// 16-digit uppercase hex form.
            pub fn to_hex(&self) -> String {
                format!("{:016X}", self.0)
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

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_hex()
            }
        }
    };
}

hex_id!(MosaicId);
hex_id!(NamespaceId);

// ---------------------------------------------------------------------------
// Unresolved forms
// ---------------------------------------------------------------------------

/// An address, or a namespace id aliased to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnresolvedAddress {
    Address(Address),
    Namespace(NamespaceId),
}

impl UnresolvedAddress {
    /// Decodes the 48-character hex form used on the wire.
    pub fn from_encoded(encoded: &str) -> Result<Self, AddressError> {
        if encoded.len() != ADDRESS_LENGTH * 2 {
            return Err(AddressError::InvalidLength(encoded.len()));
        }
        let bytes = hex::decode(encoded).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        if bytes[0] & ADDRESS_ALIAS_FLAG == ADDRESS_ALIAS_FLAG {
            let mut id = [0u8; 8];
            id.copy_from_slice(&bytes[1..9]);
            Ok(Self::Namespace(NamespaceId(u64::from_le_bytes(id))))
        } else {
            Address::from_encoded(encoded).map(Self::Address)
        }
    }

    /// Encodes to the 24-byte wire form. An alias is written with the
    /// given network byte plus the alias flag, the little-endian id, and
    /// zero padding.
    pub fn to_bytes(&self, network: NetworkType) -> [u8; ADDRESS_LENGTH] {
        match self {
            Self::Address(address) => *address.as_bytes(),
            Self::Namespace(id) => {
                let mut raw = [0u8; ADDRESS_LENGTH];
                raw[0] = network.as_u8() | ADDRESS_ALIAS_FLAG;
                raw[1..9].copy_from_slice(&id.0.to_le_bytes());
                raw
            }
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, Self::Namespace(_))
    }
}

impl From<Address> for UnresolvedAddress {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl fmt::Display for UnresolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{}", address),
            Self::Namespace(id) => write!(f, "@{}", id),
        }
    }
}

/// A mosaic id, or a namespace id aliased to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnresolvedMosaicId {
    Mosaic(MosaicId),
    Namespace(NamespaceId),
}

impl UnresolvedMosaicId {
    /// Classifies a raw `u64` by its most significant bit.
    pub fn from_u64(value: u64) -> Self {
        if value & MOSAIC_ALIAS_FLAG == MOSAIC_ALIAS_FLAG {
            Self::Namespace(NamespaceId(value))
        } else {
            Self::Mosaic(MosaicId(value))
        }
    }

    /// Parses the hex form and classifies it.
    pub fn from_hex(value: &str) -> Option<Self> {
        parse_hex_u64(value).map(Self::from_u64)
    }

    /// The raw `u64` written on the wire.
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Mosaic(id) => id.0,
            Self::Namespace(id) => id.0,
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, Self::Namespace(_))
    }
}

impl From<MosaicId> for UnresolvedMosaicId {
    fn from(id: MosaicId) -> Self {
        Self::Mosaic(id)
    }
}

impl fmt::Display for UnresolvedMosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mosaic(id) => write!(f, "{}", id),
            Self::Namespace(id) => write!(f, "@{}", id),
        }
    }
}

/// An amount of some (possibly aliased) mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Mosaic {
    pub id: UnresolvedMosaicId,
    pub amount: u64,
}

impl Mosaic {
    pub fn new(id: impl Into<UnresolvedMosaicId>, amount: u64) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_u64_bounds() {
        assert_eq!(parse_hex_u64("85BBEA6CC462B244"), Some(0x85BB_EA6C_C462_B244));
        assert_eq!(parse_hex_u64("ff"), Some(255));
        assert_eq!(parse_hex_u64(""), None);
        assert_eq!(parse_hex_u64("1FFFFFFFFFFFFFFFF"), None);
        assert_eq!(parse_hex_u64("XYZ"), None);
    }

    #[test]
    fn test_alias_address_decodes_namespace() {
        let unresolved =
            UnresolvedAddress::from_encoded("9151776168D24257D8000000000000000000000000000000")
                .unwrap();
        assert_eq!(
            unresolved,
            UnresolvedAddress::Namespace(NamespaceId(0xD857_42D2_6861_7751))
        );
    }

    #[test]
    fn test_plain_address_decodes_address() {
        let unresolved =
            UnresolvedAddress::from_encoded("9050B9837EFAB4BBE8A4B9BB32D812F9885C00D8FC1650E1")
                .unwrap();
        assert!(!unresolved.is_alias());
    }

    #[test]
    fn test_alias_address_bytes_roundtrip() {
        let encoded = "9151776168D24257D8000000000000000000000000000000";
        let unresolved = UnresolvedAddress::from_encoded(encoded).unwrap();
        let bytes = unresolved.to_bytes(NetworkType::MijinTest);
        assert_eq!(hex::encode_upper(bytes), encoded);
    }

    #[test]
    fn test_mosaic_msb_selects_namespace() {
        assert!(UnresolvedMosaicId::from_hex("85BBEA6CC462B244").unwrap().is_alias());
        assert_eq!(
            UnresolvedMosaicId::from_hex("6BED913FA20223F8"),
            Some(UnresolvedMosaicId::Mosaic(MosaicId(0x6BED_913F_A202_23F8)))
        );
    }

    #[test]
    fn test_id_display_is_padded_hex() {
        assert_eq!(MosaicId(0xAB).to_string(), "00000000000000AB");
        assert_eq!(NamespaceId::from_hex("00000000000000ab"), Some(NamespaceId(0xAB)));
    }
}
