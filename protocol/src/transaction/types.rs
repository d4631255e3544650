//! Core type definitions shared by every transaction kind.
//!
//! [`TransactionType`] is the closed set of kinds the factory understands.
//! Adding a kind means adding a variant here, and the compiler then points
//! at every `match` that needs a new arm.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Transaction kind, with its on-chain `u16` code as discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
#[repr(u16)]
pub enum TransactionType {
    Transfer = 0x4154,
    NamespaceRegistration = 0x414E,
    AddressAlias = 0x424E,
    MosaicAlias = 0x434E,
    MosaicDefinition = 0x414D,
    MosaicSupplyChange = 0x424D,
    MultisigAccountModification = 0x4155,
    AggregateComplete = 0x4141,
    AggregateBonded = 0x4241,
    HashLock = 0x4148,
    SecretLock = 0x4152,
    SecretProof = 0x4252,
    AccountAddressRestriction = 0x4150,
    AccountMosaicRestriction = 0x4250,
    AccountOperationRestriction = 0x4350,
    AccountKeyLink = 0x414C,
    NodeKeyLink = 0x424C,
    VrfKeyLink = 0x4243,
    VotingKeyLink = 0x4143,
    MosaicGlobalRestriction = 0x4151,
    MosaicAddressRestriction = 0x4251,
    AccountMetadata = 0x4144,
    MosaicMetadata = 0x4244,
    NamespaceMetadata = 0x4344,
}

impl TransactionType {
    /// Every kind, in declaration order.
    pub const ALL: [TransactionType; 24] = [
        Self::Transfer,
        Self::NamespaceRegistration,
        Self::AddressAlias,
        Self::MosaicAlias,
        Self::MosaicDefinition,
        Self::MosaicSupplyChange,
        Self::MultisigAccountModification,
        Self::AggregateComplete,
        Self::AggregateBonded,
        Self::HashLock,
        Self::SecretLock,
        Self::SecretProof,
        Self::AccountAddressRestriction,
        Self::AccountMosaicRestriction,
        Self::AccountOperationRestriction,
        Self::AccountKeyLink,
        Self::NodeKeyLink,
        Self::VrfKeyLink,
        Self::VotingKeyLink,
        Self::MosaicGlobalRestriction,
        Self::MosaicAddressRestriction,
        Self::AccountMetadata,
        Self::MosaicMetadata,
        Self::NamespaceMetadata,
    ];

    /// The on-chain code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// True for both aggregate flavours.
    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::AggregateComplete | Self::AggregateBonded)
    }
}

/// Error for a type code outside the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction type 0x{0:04X}")]
pub struct UnknownTransactionType(pub u16);

impl TryFrom<u16> for TransactionType {
    type Error = UnknownTransactionType;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or(UnknownTransactionType(code))
    }
}

impl From<TransactionType> for u16 {
    fn from(value: TransactionType) -> Self {
        value.code()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transfer => "Transfer",
            Self::NamespaceRegistration => "NamespaceRegistration",
            Self::AddressAlias => "AddressAlias",
            Self::MosaicAlias => "MosaicAlias",
            Self::MosaicDefinition => "MosaicDefinition",
            Self::MosaicSupplyChange => "MosaicSupplyChange",
            Self::MultisigAccountModification => "MultisigAccountModification",
            Self::AggregateComplete => "AggregateComplete",
            Self::AggregateBonded => "AggregateBonded",
            Self::HashLock => "HashLock",
            Self::SecretLock => "SecretLock",
            Self::SecretProof => "SecretProof",
            Self::AccountAddressRestriction => "AccountAddressRestriction",
            Self::AccountMosaicRestriction => "AccountMosaicRestriction",
            Self::AccountOperationRestriction => "AccountOperationRestriction",
            Self::AccountKeyLink => "AccountKeyLink",
            Self::NodeKeyLink => "NodeKeyLink",
            Self::VrfKeyLink => "VrfKeyLink",
            Self::VotingKeyLink => "VotingKeyLink",
            Self::MosaicGlobalRestriction => "MosaicGlobalRestriction",
            Self::MosaicAddressRestriction => "MosaicAddressRestriction",
            Self::AccountMetadata => "AccountMetadata",
            Self::MosaicMetadata => "MosaicMetadata",
            Self::NamespaceMetadata => "NamespaceMetadata",
        };
        write!(f, "{}", name)
    }
}

// ---------------------------------------------------------------------------
// Small action enums
// ---------------------------------------------------------------------------

/// Link / unlink flag used by alias and key-link transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkAction {
    Unlink = 0,
    Link = 1,
}

impl LinkAction {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unlink),
            1 => Some(Self::Link),
            _ => None,
        }
    }
}

/// Direction of a mosaic supply change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MosaicSupplyChangeAction {
    Decrease = 0,
    Increase = 1,
}

impl MosaicSupplyChangeAction {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Decrease),
            1 => Some(Self::Increase),
            _ => None,
        }
    }
}
