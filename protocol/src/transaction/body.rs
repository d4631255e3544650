//! The decoded transaction and its kind-specific bodies.

use serde::Serialize;

use super::envelope::{Envelope, TransactionInfo};
use super::ids::{Mosaic, MosaicId, NamespaceId, UnresolvedAddress, UnresolvedMosaicId};
use super::message::Message;
use super::types::{LinkAction, MosaicSupplyChangeAction, TransactionType};
use crate::account::{Address, Hash256, PublicAccount, PublicKey, Signature};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A fully decoded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub envelope: Envelope,
    pub body: TransactionBody,
    /// Absent until the transaction is seen in a block.
    pub info: Option<TransactionInfo>,
    /// Byte length as reported by the record, carried unchanged.
    pub size: Option<u32>,
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    /// Hash reported in the standalone metadata, if any.
    pub fn hash(&self) -> Option<&str> {
        match &self.info {
            Some(TransactionInfo::Standalone { hash, .. }) => hash.as_deref(),
            _ => None,
        }
    }

    /// Inner transactions, empty for anything but an aggregate.
    pub fn inner_transactions(&self) -> &[Transaction] {
        match &self.body {
            TransactionBody::AggregateComplete(agg) | TransactionBody::AggregateBonded(agg) => {
                &agg.transactions
            }
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionBody
// ---------------------------------------------------------------------------

/// Kind-specific part of a transaction. One variant per [`TransactionType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum TransactionBody {
    Transfer(TransferBody),
    NamespaceRegistration(NamespaceRegistrationBody),
    AddressAlias(AddressAliasBody),
    MosaicAlias(MosaicAliasBody),
    MosaicDefinition(MosaicDefinitionBody),
    MosaicSupplyChange(MosaicSupplyChangeBody),
    MultisigAccountModification(MultisigAccountModificationBody),
    AggregateComplete(AggregateBody),
    AggregateBonded(AggregateBody),
    HashLock(HashLockBody),
    SecretLock(SecretLockBody),
    SecretProof(SecretProofBody),
    AccountAddressRestriction(AccountRestrictionBody<UnresolvedAddress>),
    AccountMosaicRestriction(AccountRestrictionBody<UnresolvedMosaicId>),
    AccountOperationRestriction(AccountRestrictionBody<TransactionType>),
    AccountKeyLink(KeyLinkBody),
    NodeKeyLink(KeyLinkBody),
    VrfKeyLink(KeyLinkBody),
    VotingKeyLink(VotingKeyLinkBody),
    MosaicGlobalRestriction(MosaicGlobalRestrictionBody),
    MosaicAddressRestriction(MosaicAddressRestrictionBody),
    AccountMetadata(AccountMetadataBody),
    MosaicMetadata(MosaicMetadataBody),
    NamespaceMetadata(NamespaceMetadataBody),
}

impl TransactionBody {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Transfer(_) => TransactionType::Transfer,
            Self::NamespaceRegistration(_) => TransactionType::NamespaceRegistration,
            Self::AddressAlias(_) => TransactionType::AddressAlias,
            Self::MosaicAlias(_) => TransactionType::MosaicAlias,
            Self::MosaicDefinition(_) => TransactionType::MosaicDefinition,
            Self::MosaicSupplyChange(_) => TransactionType::MosaicSupplyChange,
            Self::MultisigAccountModification(_) => TransactionType::MultisigAccountModification,
            Self::AggregateComplete(_) => TransactionType::AggregateComplete,
            Self::AggregateBonded(_) => TransactionType::AggregateBonded,
            Self::HashLock(_) => TransactionType::HashLock,
            Self::SecretLock(_) => TransactionType::SecretLock,
            Self::SecretProof(_) => TransactionType::SecretProof,
            Self::AccountAddressRestriction(_) => TransactionType::AccountAddressRestriction,
            Self::AccountMosaicRestriction(_) => TransactionType::AccountMosaicRestriction,
            Self::AccountOperationRestriction(_) => TransactionType::AccountOperationRestriction,
            Self::AccountKeyLink(_) => TransactionType::AccountKeyLink,
            Self::NodeKeyLink(_) => TransactionType::NodeKeyLink,
            Self::VrfKeyLink(_) => TransactionType::VrfKeyLink,
            Self::VotingKeyLink(_) => TransactionType::VotingKeyLink,
            Self::MosaicGlobalRestriction(_) => TransactionType::MosaicGlobalRestriction,
            Self::MosaicAddressRestriction(_) => TransactionType::MosaicAddressRestriction,
            Self::AccountMetadata(_) => TransactionType::AccountMetadata,
            Self::MosaicMetadata(_) => TransactionType::MosaicMetadata,
            Self::NamespaceMetadata(_) => TransactionType::NamespaceMetadata,
        }
    }

    /// Every address-or-alias field of this body, in wire order.
    ///
    /// Aggregates return nothing: their inner transactions sit at their own
    /// positions and are visited one by one.
    pub fn unresolved_addresses(&self) -> Vec<&UnresolvedAddress> {
        match self {
            Self::Transfer(b) => vec![&b.recipient],
            Self::MultisigAccountModification(b) => {
                b.address_additions.iter().chain(&b.address_deletions).collect()
            }
            Self::SecretLock(b) => vec![&b.recipient],
            Self::SecretProof(b) => vec![&b.recipient],
            Self::AccountAddressRestriction(b) => b
                .restriction_additions
                .iter()
                .chain(&b.restriction_deletions)
                .collect(),
            Self::MosaicAddressRestriction(b) => vec![&b.target_address],
            Self::AccountMetadata(b) => vec![&b.target_address],
            Self::MosaicMetadata(b) => vec![&b.target_address],
            Self::NamespaceMetadata(b) => vec![&b.target_address],
            Self::NamespaceRegistration(_)
            | Self::AddressAlias(_)
            | Self::MosaicAlias(_)
            | Self::MosaicDefinition(_)
            | Self::MosaicSupplyChange(_)
            | Self::AggregateComplete(_)
            | Self::AggregateBonded(_)
            | Self::HashLock(_)
            | Self::AccountMosaicRestriction(_)
            | Self::AccountOperationRestriction(_)
            | Self::AccountKeyLink(_)
            | Self::NodeKeyLink(_)
            | Self::VrfKeyLink(_)
            | Self::VotingKeyLink(_)
            | Self::MosaicGlobalRestriction(_) => Vec::new(),
        }
    }

    /// Every mosaic-or-alias field of this body, in wire order.
    pub fn unresolved_mosaic_ids(&self) -> Vec<&UnresolvedMosaicId> {
        match self {
            Self::Transfer(b) => b.mosaics.iter().map(|m| &m.id).collect(),
            Self::MosaicSupplyChange(b) => vec![&b.mosaic_id],
            Self::HashLock(b) => vec![&b.mosaic.id],
            Self::SecretLock(b) => vec![&b.mosaic.id],
            Self::AccountMosaicRestriction(b) => b
                .restriction_additions
                .iter()
                .chain(&b.restriction_deletions)
                .collect(),
            Self::MosaicGlobalRestriction(b) => vec![&b.mosaic_id, &b.reference_mosaic_id],
            Self::MosaicAddressRestriction(b) => vec![&b.mosaic_id],
            Self::MosaicMetadata(b) => vec![&b.target_mosaic_id],
            Self::NamespaceRegistration(_)
            | Self::AddressAlias(_)
            | Self::MosaicAlias(_)
            | Self::MosaicDefinition(_)
            | Self::MultisigAccountModification(_)
            | Self::AggregateComplete(_)
            | Self::AggregateBonded(_)
            | Self::SecretProof(_)
            | Self::AccountAddressRestriction(_)
            | Self::AccountOperationRestriction(_)
            | Self::AccountKeyLink(_)
            | Self::NodeKeyLink(_)
            | Self::VrfKeyLink(_)
            | Self::VotingKeyLink(_)
            | Self::AccountMetadata(_)
            | Self::NamespaceMetadata(_) => Vec::new(),
        }
    }

    /// Whether any address or mosaic field of this body is an alias.
    pub fn has_aliases(&self) -> bool {
        self.unresolved_addresses().iter().any(|a| a.is_alias())
            || self.unresolved_mosaic_ids().iter().any(|m| m.is_alias())
    }

    pub fn unresolved_addresses_mut(&mut self) -> Vec<&mut UnresolvedAddress> {
        match self {
            Self::Transfer(b) => vec![&mut b.recipient],
            Self::MultisigAccountModification(b) => b
                .address_additions
                .iter_mut()
                .chain(b.address_deletions.iter_mut())
                .collect(),
            Self::SecretLock(b) => vec![&mut b.recipient],
            Self::SecretProof(b) => vec![&mut b.recipient],
            Self::AccountAddressRestriction(b) => b
                .restriction_additions
                .iter_mut()
                .chain(b.restriction_deletions.iter_mut())
                .collect(),
            Self::MosaicAddressRestriction(b) => vec![&mut b.target_address],
            Self::AccountMetadata(b) => vec![&mut b.target_address],
            Self::MosaicMetadata(b) => vec![&mut b.target_address],
            Self::NamespaceMetadata(b) => vec![&mut b.target_address],
            Self::NamespaceRegistration(_)
            | Self::AddressAlias(_)
            | Self::MosaicAlias(_)
            | Self::MosaicDefinition(_)
            | Self::MosaicSupplyChange(_)
            | Self::AggregateComplete(_)
            | Self::AggregateBonded(_)
            | Self::HashLock(_)
            | Self::AccountMosaicRestriction(_)
            | Self::AccountOperationRestriction(_)
            | Self::AccountKeyLink(_)
            | Self::NodeKeyLink(_)
            | Self::VrfKeyLink(_)
            | Self::VotingKeyLink(_)
            | Self::MosaicGlobalRestriction(_) => Vec::new(),
        }
    }

    /// Every mosaic-or-alias field of this body, in wire order.
    pub fn unresolved_mosaic_ids_mut(&mut self) -> Vec<&mut UnresolvedMosaicId> {
        match self {
            Self::Transfer(b) => b.mosaics.iter_mut().map(|m| &mut m.id).collect(),
            Self::MosaicSupplyChange(b) => vec![&mut b.mosaic_id],
            Self::HashLock(b) => vec![&mut b.mosaic.id],
            Self::SecretLock(b) => vec![&mut b.mosaic.id],
            Self::AccountMosaicRestriction(b) => b
                .restriction_additions
                .iter_mut()
                .chain(b.restriction_deletions.iter_mut())
                .collect(),
            Self::MosaicGlobalRestriction(b) => {
                vec![&mut b.mosaic_id, &mut b.reference_mosaic_id]
            }
            Self::MosaicAddressRestriction(b) => vec![&mut b.mosaic_id],
            Self::MosaicMetadata(b) => vec![&mut b.target_mosaic_id],
            Self::NamespaceRegistration(_)
            | Self::AddressAlias(_)
            | Self::MosaicAlias(_)
            | Self::MosaicDefinition(_)
            | Self::MultisigAccountModification(_)
            | Self::AggregateComplete(_)
            | Self::AggregateBonded(_)
            | Self::SecretProof(_)
            | Self::AccountAddressRestriction(_)
            | Self::AccountOperationRestriction(_)
            | Self::AccountKeyLink(_)
            | Self::NodeKeyLink(_)
            | Self::VrfKeyLink(_)
            | Self::VotingKeyLink(_)
            | Self::AccountMetadata(_)
            | Self::NamespaceMetadata(_) => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    pub recipient: UnresolvedAddress,
    pub mosaics: Vec<Mosaic>,
    pub message: Message,
}

/// Root namespaces rent for a duration; children hang off a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NamespaceRegistration {
    Root { duration: u64 },
    Child { parent_id: NamespaceId },
}

impl NamespaceRegistration {
    /// Wire value of `registrationType`.
    pub fn registration_type(&self) -> u8 {
        match self {
            Self::Root { .. } => 0,
            Self::Child { .. } => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceRegistrationBody {
    pub registration: NamespaceRegistration,
    pub id: NamespaceId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressAliasBody {
    pub namespace_id: NamespaceId,
    pub address: Address,
    pub action: LinkAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicAliasBody {
    pub namespace_id: NamespaceId,
    pub mosaic_id: MosaicId,
    pub action: LinkAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicDefinitionBody {
    pub id: MosaicId,
    pub duration: u64,
    pub nonce: u32,
    pub flags: u8,
    pub divisibility: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicSupplyChangeBody {
    pub mosaic_id: UnresolvedMosaicId,
    pub action: MosaicSupplyChangeAction,
    pub delta: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigAccountModificationBody {
    pub min_approval_delta: i8,
    pub min_removal_delta: i8,
    pub address_additions: Vec<UnresolvedAddress>,
    pub address_deletions: Vec<UnresolvedAddress>,
}

/// A cosignature attached to an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cosignature {
    pub version: u64,
    pub signer: PublicAccount,
    pub signature: Signature,
}

/// Shared by complete and bonded aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateBody {
    /// Inner transactions in aggregate order. Their deadline, fee and
    /// signature are the aggregate's own.
    pub transactions: Vec<Transaction>,
    pub cosignatures: Vec<Cosignature>,
}

/// Funds locked while an aggregate bonded transaction collects its
/// cosignatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashLockBody {
    pub mosaic: Mosaic,
    pub duration: u64,
    /// Hash of the aggregate bonded transaction being backed.
    pub hash: Hash256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretLockBody {
    pub recipient: UnresolvedAddress,
    pub secret: Hash256,
    pub mosaic: Mosaic,
    pub duration: u64,
    pub hash_algorithm: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretProofBody {
    pub recipient: UnresolvedAddress,
    pub secret: Hash256,
    pub hash_algorithm: u8,
    #[serde(serialize_with = "hex_upper")]
    pub proof: Vec<u8>,
}

/// Allow or block list edit. `T` is an address, a mosaic id or a
/// transaction type depending on the restriction kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRestrictionBody<T> {
    pub restriction_flags: u16,
    pub restriction_additions: Vec<T>,
    pub restriction_deletions: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyLinkBody {
    pub linked_public_key: PublicKey,
    pub link_action: LinkAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingKeyLinkBody {
    pub linked_public_key: PublicKey,
    pub start_epoch: u32,
    pub end_epoch: u32,
    pub link_action: LinkAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicGlobalRestrictionBody {
    pub mosaic_id: UnresolvedMosaicId,
    pub reference_mosaic_id: UnresolvedMosaicId,
    pub restriction_key: u64,
    pub previous_restriction_value: u64,
    pub previous_restriction_type: u8,
    pub new_restriction_value: u64,
    pub new_restriction_type: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicAddressRestrictionBody {
    pub mosaic_id: UnresolvedMosaicId,
    pub restriction_key: u64,
    pub target_address: UnresolvedAddress,
    pub previous_restriction_value: u64,
    pub new_restriction_value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetadataBody {
    pub target_address: UnresolvedAddress,
    pub scoped_metadata_key: u64,
    pub value_size_delta: i16,
    #[serde(serialize_with = "hex_upper")]
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicMetadataBody {
    pub target_address: UnresolvedAddress,
    pub scoped_metadata_key: u64,
    pub target_mosaic_id: UnresolvedMosaicId,
    pub value_size_delta: i16,
    #[serde(serialize_with = "hex_upper")]
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceMetadataBody {
    pub target_address: UnresolvedAddress,
    pub scoped_metadata_key: u64,
    pub target_namespace_id: NamespaceId,
    pub value_size_delta: i16,
    #[serde(serialize_with = "hex_upper")]
    pub value: Vec<u8>,
}

fn hex_upper<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode_upper(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::NetworkType;
    use crate::transaction::envelope::Deadline;

    fn envelope() -> Envelope {
        Envelope {
            network: NetworkType::TestNet,
            version: 1,
            deadline: Deadline(1),
            max_fee: 0,
            signature: None,
            signer: None,
        }
    }

    fn alias(id: u64) -> UnresolvedAddress {
        UnresolvedAddress::Namespace(NamespaceId(id))
    }

    #[test]
    fn test_unresolved_fields_of_multisig() {
        let mut body = TransactionBody::MultisigAccountModification(MultisigAccountModificationBody {
            min_approval_delta: 1,
            min_removal_delta: 1,
            address_additions: vec![alias(1), alias(2)],
            address_deletions: vec![alias(3)],
        });
        let ids: Vec<UnresolvedAddress> =
            body.unresolved_addresses_mut().into_iter().map(|a| *a).collect();
        assert_eq!(ids, vec![alias(1), alias(2), alias(3)]);
        assert!(body.unresolved_mosaic_ids_mut().is_empty());
        assert_eq!(body.unresolved_addresses(), vec![&alias(1), &alias(2), &alias(3)]);
        assert!(body.has_aliases());
    }

    #[test]
    fn test_unresolved_fields_of_global_restriction() {
        let mut body = TransactionBody::MosaicGlobalRestriction(MosaicGlobalRestrictionBody {
            mosaic_id: UnresolvedMosaicId::from_u64(0x85BB_EA6C_C462_B244),
            reference_mosaic_id: UnresolvedMosaicId::from_u64(0),
            restriction_key: 1,
            previous_restriction_value: 0,
            previous_restriction_type: 0,
            new_restriction_value: 1,
            new_restriction_type: 1,
        });
        assert_eq!(body.unresolved_mosaic_ids_mut().len(), 2);
        // The high bit marks 0x85BB... as a namespace alias.
        assert_eq!(body.unresolved_mosaic_ids().iter().filter(|m| m.is_alias()).count(), 1);
        assert!(body.has_aliases());
    }

    #[test]
    fn test_inner_transactions_only_for_aggregates() {
        let inner = Transaction {
            envelope: envelope(),
            body: TransactionBody::AccountKeyLink(KeyLinkBody {
                linked_public_key: PublicKey::from_bytes([7; 32]),
                link_action: LinkAction::Link,
            }),
            info: None,
            size: None,
        };
        assert!(inner.inner_transactions().is_empty());

        let aggregate = Transaction {
            envelope: envelope(),
            body: TransactionBody::AggregateBonded(AggregateBody {
                transactions: vec![inner.clone()],
                cosignatures: vec![],
            }),
            info: None,
            size: None,
        };
        assert_eq!(aggregate.inner_transactions(), &[inner]);
        assert_eq!(aggregate.transaction_type(), TransactionType::AggregateBonded);
    }
}
