//! # Transaction Factory
//!
//! Turns a REST record into a typed [`Transaction`].
//!
//! ```text
//! { "id": "...", "meta": { ... }, "transaction": { "type": 16724, ... } }
//! ```
//!
//! Dispatch happens once, in `decode_body`, as an exhaustive `match` over
//! [`TransactionType`]. Unknown type codes fail before dispatch, so there
//! is no fallback arm.
//!
//! Aggregates decode their inner records through the same path, with the
//! aggregate's deadline, fee and signature passed down explicitly as an
//! [`InheritedEnvelope`]. The input record is never modified.
//!
//! ## Number formats
//!
//! 64-bit amounts, heights and durations arrive as decimal strings. Ids,
//! restriction keys and metadata keys arrive as hex strings. JSON numbers
//! are accepted where they are integers; a fractional number is an error.

use serde_json::{Map, Value};
use tracing::debug;

use super::body::*;
use super::envelope::{Deadline, Envelope, InheritedEnvelope, TransactionInfo};
use super::error::DecodingError;
use super::ids::{parse_hex_u64, Mosaic, MosaicId, NamespaceId, UnresolvedAddress, UnresolvedMosaicId};
use super::message::Message;
use super::types::{LinkAction, MosaicSupplyChangeAction, TransactionType};
use crate::account::{Address, Hash256, NetworkType, PublicAccount, PublicKey, Signature};

type Result<T> = std::result::Result<T, DecodingError>;

/// Where the transaction being decoded sits.
#[derive(Clone, Copy)]
enum Position<'a> {
    TopLevel,
    Inner {
        index: usize,
        inherited: &'a InheritedEnvelope,
    },
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Decodes one REST transaction record.
///
/// Pure and deterministic: the same record always yields the same
/// transaction, and concurrent calls share nothing.
pub fn decode(record: &Value) -> Result<Transaction> {
    let fields = required(record, "transaction")?;
    let info = extract_info(optional(record, "meta"), optional(record, "id"))?;
    decode_transaction(fields, info, Position::TopLevel)
}

/// Decodes a batch of records, stopping at the first failure.
pub fn decode_all(records: &[Value]) -> Result<Vec<Transaction>> {
    records.iter().map(decode).collect()
}

fn decode_transaction(
    fields: &Value,
    info: Option<TransactionInfo>,
    position: Position<'_>,
) -> Result<Transaction> {
    let code: u16 = unsigned(required(fields, "type")?, "type")?;
    let transaction_type =
        TransactionType::try_from(code).map_err(|_| DecodingError::UnknownType(code))?;

    let envelope = decode_envelope(fields, position)?;
    let body = decode_body(transaction_type, fields, &envelope, position)?;
    let size = optional(fields, "size")
        .map(|v| unsigned::<u32>(v, "size"))
        .transpose()?;

    Ok(Transaction {
        envelope,
        body,
        info,
        size,
    })
}

fn decode_envelope(fields: &Value, position: Position<'_>) -> Result<Envelope> {
    let network_byte: u8 = unsigned(required(fields, "network")?, "network")?;
    let network = NetworkType::from_u8(network_byte).ok_or_else(|| {
        DecodingError::invalid("network", format!("unknown network 0x{:02X}", network_byte))
    })?;
    let version: u8 = unsigned(required(fields, "version")?, "version")?;
    let signer = optional(fields, "signerPublicKey")
        .map(|v| public_key(v, "signerPublicKey"))
        .transpose()?
        .map(|key| PublicAccount::new(key, network));

    let (deadline, max_fee, signature) = match position {
        Position::Inner { inherited, .. } => {
            (inherited.deadline, inherited.max_fee, inherited.signature)
        }
        Position::TopLevel => (
            optional(fields, "deadline")
                .map(|v| numeric_u64(v, "deadline"))
                .transpose()?
                .map(Deadline)
                .unwrap_or_default(),
            optional(fields, "maxFee")
                .map(|v| numeric_u64(v, "maxFee"))
                .transpose()?
                .unwrap_or(0),
            optional(fields, "signature")
                .map(|v| signature(v, "signature"))
                .transpose()?,
        ),
    };

    Ok(Envelope {
        network,
        version,
        deadline,
        max_fee,
        signature,
        signer,
    })
}

/// Reads the `meta` block. An aggregate hash or id marks an inner record.
fn extract_info(meta: Option<&Value>, id: Option<&Value>) -> Result<Option<TransactionInfo>> {
    let Some(meta) = meta else {
        return Ok(None);
    };
    let height = numeric_u64(required(meta, "height")?, "meta.height")?;
    let index: u32 = unsigned(required(meta, "index")?, "meta.index")?;
    let id = id.and_then(Value::as_str).map(str::to_string);
    let text = |name: &str| optional(meta, name).and_then(Value::as_str).map(str::to_string);

    let aggregate_hash = text("aggregateHash");
    let aggregate_id = text("aggregateId");
    if aggregate_hash.is_some() || aggregate_id.is_some() {
        return Ok(Some(TransactionInfo::AggregateInner {
            height,
            index,
            id,
            aggregate_hash,
            aggregate_id,
        }));
    }
    Ok(Some(TransactionInfo::Standalone {
        height,
        index,
        id,
        hash: text("hash"),
        merkle_component_hash: text("merkleComponentHash"),
    }))
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn decode_body(
    transaction_type: TransactionType,
    f: &Value,
    envelope: &Envelope,
    position: Position<'_>,
) -> Result<TransactionBody> {
    let body = match transaction_type {
        TransactionType::Transfer => TransactionBody::Transfer(TransferBody {
            recipient: address_or_alias(required(f, "recipientAddress")?, "recipientAddress")?,
            mosaics: extract_mosaics(optional(f, "mosaics"))?,
            message: extract_message(optional(f, "message"))?,
        }),
        TransactionType::NamespaceRegistration => {
            let registration = match unsigned::<u8>(required(f, "registrationType")?, "registrationType")? {
                0 => NamespaceRegistration::Root {
                    duration: numeric_u64(required(f, "duration")?, "duration")?,
                },
                1 => NamespaceRegistration::Child {
                    parent_id: namespace_id(required(f, "parentId")?, "parentId")?,
                },
                other => {
                    return Err(DecodingError::invalid(
                        "registrationType",
                        format!("unknown registration type {}", other),
                    ))
                }
            };
            TransactionBody::NamespaceRegistration(NamespaceRegistrationBody {
                registration,
                id: namespace_id(required(f, "id")?, "id")?,
                name: string(required(f, "name")?, "name")?.to_string(),
            })
        }
        TransactionType::AddressAlias => {
            let address = match address_or_alias(required(f, "address")?, "address")? {
                UnresolvedAddress::Address(address) => address,
                UnresolvedAddress::Namespace(_) => {
                    return Err(DecodingError::invalid("address", "alias target must be an address"))
                }
            };
            TransactionBody::AddressAlias(AddressAliasBody {
                namespace_id: namespace_id(required(f, "namespaceId")?, "namespaceId")?,
                address,
                action: link_action(required(f, "aliasAction")?, "aliasAction")?,
            })
        }
        TransactionType::MosaicAlias => TransactionBody::MosaicAlias(MosaicAliasBody {
            namespace_id: namespace_id(required(f, "namespaceId")?, "namespaceId")?,
            mosaic_id: MosaicId(hex_u64(required(f, "mosaicId")?, "mosaicId")?),
            action: link_action(required(f, "aliasAction")?, "aliasAction")?,
        }),
        TransactionType::MosaicDefinition => TransactionBody::MosaicDefinition(MosaicDefinitionBody {
            id: MosaicId(hex_u64(required(f, "id")?, "id")?),
            duration: numeric_u64(required(f, "duration")?, "duration")?,
            nonce: unsigned(required(f, "nonce")?, "nonce")?,
            flags: unsigned(required(f, "flags")?, "flags")?,
            divisibility: unsigned(required(f, "divisibility")?, "divisibility")?,
        }),
        TransactionType::MosaicSupplyChange => {
            let action: u8 = unsigned(required(f, "action")?, "action")?;
            TransactionBody::MosaicSupplyChange(MosaicSupplyChangeBody {
                mosaic_id: mosaic_or_alias(required(f, "mosaicId")?, "mosaicId")?,
                action: MosaicSupplyChangeAction::from_u8(action)
                    .ok_or_else(|| DecodingError::invalid("action", format!("unknown action {}", action)))?,
                delta: numeric_u64(required(f, "delta")?, "delta")?,
            })
        }
        TransactionType::MultisigAccountModification => {
            TransactionBody::MultisigAccountModification(MultisigAccountModificationBody {
                min_approval_delta: signed(required(f, "minApprovalDelta")?, "minApprovalDelta")?,
                min_removal_delta: signed(required(f, "minRemovalDelta")?, "minRemovalDelta")?,
                address_additions: list(f, "addressAdditions", address_or_alias)?,
                address_deletions: list(f, "addressDeletions", address_or_alias)?,
            })
        }
        TransactionType::AggregateComplete => match position {
            Position::TopLevel => TransactionBody::AggregateComplete(decode_aggregate(f, envelope)?),
            Position::Inner { index, .. } => return Err(DecodingError::NestedAggregate { index }),
        },
        TransactionType::AggregateBonded => match position {
            Position::TopLevel => TransactionBody::AggregateBonded(decode_aggregate(f, envelope)?),
            Position::Inner { index, .. } => return Err(DecodingError::NestedAggregate { index }),
        },
        TransactionType::HashLock => TransactionBody::HashLock(HashLockBody {
            mosaic: Mosaic::new(
                mosaic_or_alias(required(f, "mosaicId")?, "mosaicId")?,
                numeric_u64(required(f, "amount")?, "amount")?,
            ),
            duration: numeric_u64(required(f, "duration")?, "duration")?,
            hash: hash256(required(f, "hash")?, "hash")?,
        }),
        TransactionType::SecretLock => TransactionBody::SecretLock(SecretLockBody {
            recipient: address_or_alias(required(f, "recipientAddress")?, "recipientAddress")?,
            secret: hash256(required(f, "secret")?, "secret")?,
            mosaic: Mosaic::new(
                mosaic_or_alias(required(f, "mosaicId")?, "mosaicId")?,
                numeric_u64(required(f, "amount")?, "amount")?,
            ),
            duration: numeric_u64(required(f, "duration")?, "duration")?,
            hash_algorithm: unsigned(required(f, "hashAlgorithm")?, "hashAlgorithm")?,
        }),
        TransactionType::SecretProof => TransactionBody::SecretProof(SecretProofBody {
            recipient: address_or_alias(required(f, "recipientAddress")?, "recipientAddress")?,
            secret: hash256(required(f, "secret")?, "secret")?,
            hash_algorithm: unsigned(required(f, "hashAlgorithm")?, "hashAlgorithm")?,
            proof: hex_bytes(required(f, "proof")?, "proof")?,
        }),
        TransactionType::AccountAddressRestriction => {
            TransactionBody::AccountAddressRestriction(restriction(f, address_or_alias)?)
        }
        TransactionType::AccountMosaicRestriction => {
            TransactionBody::AccountMosaicRestriction(restriction(f, mosaic_or_alias)?)
        }
        TransactionType::AccountOperationRestriction => {
            TransactionBody::AccountOperationRestriction(restriction(f, operation)?)
        }
        TransactionType::AccountKeyLink => TransactionBody::AccountKeyLink(key_link(f)?),
        TransactionType::NodeKeyLink => TransactionBody::NodeKeyLink(key_link(f)?),
        TransactionType::VrfKeyLink => TransactionBody::VrfKeyLink(key_link(f)?),
        TransactionType::VotingKeyLink => TransactionBody::VotingKeyLink(VotingKeyLinkBody {
            linked_public_key: public_key(required(f, "linkedPublicKey")?, "linkedPublicKey")?,
            start_epoch: unsigned(required(f, "startEpoch")?, "startEpoch")?,
            end_epoch: unsigned(required(f, "endEpoch")?, "endEpoch")?,
            link_action: link_action(required(f, "linkAction")?, "linkAction")?,
        }),
        TransactionType::MosaicGlobalRestriction => {
            TransactionBody::MosaicGlobalRestriction(MosaicGlobalRestrictionBody {
                mosaic_id: mosaic_or_alias(required(f, "mosaicId")?, "mosaicId")?,
                reference_mosaic_id: mosaic_or_alias(
                    required(f, "referenceMosaicId")?,
                    "referenceMosaicId",
                )?,
                restriction_key: hex_u64(required(f, "restrictionKey")?, "restrictionKey")?,
                previous_restriction_value: numeric_u64(
                    required(f, "previousRestrictionValue")?,
                    "previousRestrictionValue",
                )?,
                previous_restriction_type: unsigned(
                    required(f, "previousRestrictionType")?,
                    "previousRestrictionType",
                )?,
                new_restriction_value: numeric_u64(
                    required(f, "newRestrictionValue")?,
                    "newRestrictionValue",
                )?,
                new_restriction_type: unsigned(
                    required(f, "newRestrictionType")?,
                    "newRestrictionType",
                )?,
            })
        }
        TransactionType::MosaicAddressRestriction => {
            TransactionBody::MosaicAddressRestriction(MosaicAddressRestrictionBody {
                mosaic_id: mosaic_or_alias(required(f, "mosaicId")?, "mosaicId")?,
                restriction_key: hex_u64(required(f, "restrictionKey")?, "restrictionKey")?,
                target_address: address_or_alias(required(f, "targetAddress")?, "targetAddress")?,
                previous_restriction_value: numeric_u64(
                    required(f, "previousRestrictionValue")?,
                    "previousRestrictionValue",
                )?,
                new_restriction_value: numeric_u64(
                    required(f, "newRestrictionValue")?,
                    "newRestrictionValue",
                )?,
            })
        }
        TransactionType::AccountMetadata => TransactionBody::AccountMetadata(AccountMetadataBody {
            target_address: address_or_alias(required(f, "targetAddress")?, "targetAddress")?,
            scoped_metadata_key: hex_u64(required(f, "scopedMetadataKey")?, "scopedMetadataKey")?,
            value_size_delta: signed(required(f, "valueSizeDelta")?, "valueSizeDelta")?,
            value: hex_bytes(required(f, "value")?, "value")?,
        }),
        TransactionType::MosaicMetadata => TransactionBody::MosaicMetadata(MosaicMetadataBody {
            target_address: address_or_alias(required(f, "targetAddress")?, "targetAddress")?,
            scoped_metadata_key: hex_u64(required(f, "scopedMetadataKey")?, "scopedMetadataKey")?,
            target_mosaic_id: mosaic_or_alias(required(f, "targetMosaicId")?, "targetMosaicId")?,
            value_size_delta: signed(required(f, "valueSizeDelta")?, "valueSizeDelta")?,
            value: hex_bytes(required(f, "value")?, "value")?,
        }),
        TransactionType::NamespaceMetadata => {
            TransactionBody::NamespaceMetadata(NamespaceMetadataBody {
                target_address: address_or_alias(required(f, "targetAddress")?, "targetAddress")?,
                scoped_metadata_key: hex_u64(
                    required(f, "scopedMetadataKey")?,
                    "scopedMetadataKey",
                )?,
                target_namespace_id: namespace_id(
                    required(f, "targetNamespaceId")?,
                    "targetNamespaceId",
                )?,
                value_size_delta: signed(required(f, "valueSizeDelta")?, "valueSizeDelta")?,
                value: hex_bytes(required(f, "value")?, "value")?,
            })
        }
    };
    Ok(body)
}

fn decode_aggregate(f: &Value, envelope: &Envelope) -> Result<AggregateBody> {
    let inherited = envelope.inherited();

    let transactions = array(f, "transactions")?
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let fields = required(record, "transaction")?;
            let info = extract_info(optional(record, "meta"), optional(record, "id"))?;
            decode_transaction(
                fields,
                info,
                Position::Inner {
                    index,
                    inherited: &inherited,
                },
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let cosignatures = array(f, "cosignatures")?
        .iter()
        .map(|c| {
            Ok(Cosignature {
                version: optional(c, "version")
                    .map(|v| numeric_u64(v, "cosignatures.version"))
                    .transpose()?
                    .unwrap_or(0),
                signer: PublicAccount::new(
                    public_key(required(c, "signerPublicKey")?, "cosignatures.signerPublicKey")?,
                    envelope.network,
                ),
                signature: signature(required(c, "signature")?, "cosignatures.signature")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        inner = transactions.len(),
        cosignatures = cosignatures.len(),
        "decoded aggregate"
    );

    Ok(AggregateBody {
        transactions,
        cosignatures,
    })
}

fn restriction<T>(
    f: &Value,
    item: fn(&Value, &'static str) -> Result<T>,
) -> Result<AccountRestrictionBody<T>> {
    Ok(AccountRestrictionBody {
        restriction_flags: unsigned(required(f, "restrictionFlags")?, "restrictionFlags")?,
        restriction_additions: list(f, "restrictionAdditions", item)?,
        restriction_deletions: list(f, "restrictionDeletions", item)?,
    })
}

fn key_link(f: &Value) -> Result<KeyLinkBody> {
    Ok(KeyLinkBody {
        linked_public_key: public_key(required(f, "linkedPublicKey")?, "linkedPublicKey")?,
        link_action: link_action(required(f, "linkAction")?, "linkAction")?,
    })
}

// ---------------------------------------------------------------------------
// Shape extraction
// ---------------------------------------------------------------------------

/// Decodes an address-or-alias value.
///
/// - a hex string: bit 0 of its first byte selects alias or address,
/// - an object with `address`: a concrete address (plain or hex),
/// - an object with `id`: a namespace alias (hex),
/// - anything else fails with [`DecodingError::UnrecognisedRecipient`].
pub fn extract_recipient(value: &Value) -> Result<UnresolvedAddress> {
    address_or_alias(value, "recipient")
}

fn address_or_alias(value: &Value, field: &'static str) -> Result<UnresolvedAddress> {
    match value {
        Value::String(encoded) => UnresolvedAddress::from_encoded(encoded)
            .map_err(|e| DecodingError::invalid(field, e.to_string())),
        Value::Object(map) => recipient_object(map, value, field),
        other => Err(DecodingError::UnrecognisedRecipient(other.to_string())),
    }
}

fn recipient_object(
    map: &Map<String, Value>,
    value: &Value,
    field: &'static str,
) -> Result<UnresolvedAddress> {
    if let Some(address) = map.get("address") {
        let text = string(address, field)?;
        return Address::parse(text)
            .map(UnresolvedAddress::Address)
            .map_err(|e| DecodingError::invalid(field, e.to_string()));
    }
    if let Some(id) = map.get("id") {
        return namespace_id(id, field).map(UnresolvedAddress::Namespace);
    }
    Err(DecodingError::UnrecognisedRecipient(value.to_string()))
}

fn mosaic_or_alias(value: &Value, field: &'static str) -> Result<UnresolvedMosaicId> {
    hex_u64(value, field).map(UnresolvedMosaicId::from_u64)
}

fn namespace_id(value: &Value, field: &'static str) -> Result<NamespaceId> {
    hex_u64(value, field).map(NamespaceId)
}

fn operation(value: &Value, field: &'static str) -> Result<TransactionType> {
    let code: u16 = unsigned(value, field)?;
    TransactionType::try_from(code).map_err(|e| DecodingError::invalid(field, e.to_string()))
}

fn link_action(value: &Value, field: &'static str) -> Result<LinkAction> {
    let raw: u8 = unsigned(value, field)?;
    LinkAction::from_u8(raw)
        .ok_or_else(|| DecodingError::invalid(field, format!("unknown link action {}", raw)))
}

fn extract_mosaics(value: Option<&Value>) -> Result<Vec<Mosaic>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let items = value
        .as_array()
        .ok_or_else(|| DecodingError::invalid("mosaics", "expected an array"))?;
    items
        .iter()
        .map(|m| {
            Ok(Mosaic::new(
                mosaic_or_alias(required(m, "id")?, "mosaics.id")?,
                numeric_u64(required(m, "amount")?, "mosaics.amount")?,
            ))
        })
        .collect()
}

/// Absent or empty ⇒ empty message. An object carries an explicit type and
/// a hex payload; a bare hex string carries the type in its first byte.
fn extract_message(value: Option<&Value>) -> Result<Message> {
    let (message_type, payload) = match value {
        None => return Ok(Message::Empty),
        Some(Value::String(encoded)) if encoded.is_empty() => return Ok(Message::Empty),
        Some(Value::String(encoded)) => {
            let bytes = decode_hex(encoded, "message")?;
            (bytes[0], bytes[1..].to_vec())
        }
        Some(object @ Value::Object(_)) => {
            let message_type: u8 = unsigned(required(object, "type")?, "message.type")?;
            let payload = match optional(object, "payload") {
                Some(p) => hex_bytes(p, "message.payload")?,
                None => Vec::new(),
            };
            (message_type, payload)
        }
        Some(_) => return Err(DecodingError::invalid("message", "expected a string or object")),
    };
    Message::from_parts(message_type, payload)
        .map_err(|_| DecodingError::invalid("message", "payload is not valid UTF-8"))
}

// ---------------------------------------------------------------------------
// Primitive readers
// ---------------------------------------------------------------------------

pub(crate) fn optional<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    record.get(name).filter(|v| !v.is_null())
}

pub(crate) fn required<'a>(record: &'a Value, name: &'static str) -> Result<&'a Value> {
    optional(record, name).ok_or(DecodingError::MissingField(name))
}

pub(crate) fn array<'a>(record: &'a Value, name: &'static str) -> Result<&'a [Value]> {
    match optional(record, name) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(DecodingError::invalid(name, "expected an array")),
    }
}

fn list<T>(
    record: &Value,
    name: &'static str,
    item: fn(&Value, &'static str) -> Result<T>,
) -> Result<Vec<T>> {
    array(record, name)?.iter().map(|v| item(v, name)).collect()
}

pub(crate) fn string<'a>(value: &'a Value, field: &'static str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| DecodingError::invalid(field, "expected a string"))
}

/// Decimal string or non-negative integer.
pub(crate) fn numeric_u64(value: &Value, field: &'static str) -> Result<u64> {
    match value {
        Value::String(text) => text
            .parse::<u64>()
            .map_err(|e| DecodingError::invalid(field, format!("{:?}: {}", text, e))),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| DecodingError::invalid(field, format!("{} is not a u64", n))),
        _ => Err(DecodingError::invalid(field, "expected a numeric string")),
    }
}

/// Hex string (as REST serves ids and keys).
pub(crate) fn hex_u64(value: &Value, field: &'static str) -> Result<u64> {
    let text = string(value, field)?;
    parse_hex_u64(text)
        .ok_or_else(|| DecodingError::invalid(field, format!("{:?} is not a hex u64", text)))
}

pub(crate) fn unsigned<T: TryFrom<u64>>(value: &Value, field: &'static str) -> Result<T> {
    let raw = numeric_u64(value, field)?;
    T::try_from(raw).map_err(|_| DecodingError::invalid(field, format!("{} out of range", raw)))
}

fn signed<T: TryFrom<i64>>(value: &Value, field: &'static str) -> Result<T> {
    let raw = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(text) => text.parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| DecodingError::invalid(field, format!("{} is not an integer", value)))?;
    T::try_from(raw).map_err(|_| DecodingError::invalid(field, format!("{} out of range", raw)))
}

fn decode_hex(text: &str, field: &'static str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| DecodingError::invalid(field, e.to_string()))
}

fn hex_bytes(value: &Value, field: &'static str) -> Result<Vec<u8>> {
    decode_hex(string(value, field)?, field)
}

fn public_key(value: &Value, field: &'static str) -> Result<PublicKey> {
    PublicKey::from_hex(string(value, field)?).map_err(|e| DecodingError::invalid(field, e.to_string()))
}

fn signature(value: &Value, field: &'static str) -> Result<Signature> {
    Signature::from_hex(string(value, field)?).map_err(|e| DecodingError::invalid(field, e.to_string()))
}

fn hash256(value: &Value, field: &'static str) -> Result<Hash256> {
    Hash256::from_hex(string(value, field)?).map_err(|e| DecodingError::invalid(field, e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
