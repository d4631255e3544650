//! # Binary Layout
//!
//! Re-encodes a decoded transaction in the chain's byte layout. This lets
//! callers check the record's `size` against what was decoded and
//! recompute transaction hashes locally.
//!
//! ```text
//! top-level:  size u32 | 0 u32 | signature 64 | signer 32 | 0 u32
//!             | version u8 | network u8 | type u16 | max_fee u64 | deadline u64 | body
//! embedded:   size u32 | 0 u32 | signer 32 | 0 u32
//!             | version u8 | network u8 | type u16 | body
//! ```
//!
//! All integers are little-endian. Missing signatures and signers are
//! written as zeros. A collection longer than its count field can express
//! fails with [`DecodingError::Oversized`].

use super::body::{NamespaceRegistration, Transaction, TransactionBody};
use super::error::DecodingError;
use super::ids::{Mosaic, UnresolvedAddress};
use super::types::TransactionType;
use crate::account::{Hash256, NetworkType};
use crate::config::{
    AGGREGATE_SIGNABLE_LENGTH, EMBEDDED_ALIGNMENT, HASH_LENGTH, PUBLIC_KEY_LENGTH,
    SIGNABLE_OFFSET, SIGNATURE_LENGTH, TRANSACTION_HEADER_SIZE,
};
use crate::crypto::{merkle_root, sha3_256, sha3_256_multi};

const SIGNATURE_OFFSET: usize = 8;
const SIGNER_OFFSET: usize = SIGNATURE_OFFSET + SIGNATURE_LENGTH;

impl Transaction {
    /// Full top-level payload.
    pub fn serialize(&self) -> Result<Vec<u8>, DecodingError> {
        let mut out = Vec::with_capacity(TRANSACTION_HEADER_SIZE + 64);
        out.extend_from_slice(&0u32.to_le_bytes()); // size, patched below
        out.extend_from_slice(&0u32.to_le_bytes());
        match &self.envelope.signature {
            Some(sig) => out.extend_from_slice(sig.as_bytes()),
            None => out.extend_from_slice(&[0u8; SIGNATURE_LENGTH]),
        }
        self.write_signer(&mut out);
        out.extend_from_slice(&0u32.to_le_bytes());
        out.push(self.envelope.version);
        out.push(self.envelope.network.as_u8());
        out.extend_from_slice(&self.transaction_type().code().to_le_bytes());
        out.extend_from_slice(&self.envelope.max_fee.to_le_bytes());
        out.extend_from_slice(&self.envelope.deadline.0.to_le_bytes());
        write_body(&self.body, self.envelope.network, &mut out)?;
        patch_size(&mut out)?;
        Ok(out)
    }

    /// Payload as it appears inside an aggregate, without trailing padding.
    pub fn serialize_embedded(&self) -> Result<Vec<u8>, DecodingError> {
        let mut out = Vec::with_capacity(64);
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        self.write_signer(&mut out);
        out.extend_from_slice(&0u32.to_le_bytes());
        out.push(self.envelope.version);
        out.push(self.envelope.network.as_u8());
        out.extend_from_slice(&self.transaction_type().code().to_le_bytes());
        write_body(&self.body, self.envelope.network, &mut out)?;
        patch_size(&mut out)?;
        Ok(out)
    }

    /// Length of [`Transaction::serialize`].
    pub fn serialized_size(&self) -> Result<usize, DecodingError> {
        self.serialize().map(|bytes| bytes.len())
    }

    /// Whether the re-encoded length equals the `size` the record carried.
    /// `false` when the record carried no size or cannot be re-encoded.
    pub fn size_matches(&self) -> bool {
        match (self.size, self.serialized_size()) {
            (Some(size), Ok(encoded)) => size as usize == encoded,
            _ => false,
        }
    }

    /// Hash of this transaction on the network with the given generation
    /// hash.
    pub fn hash_with(&self, generation_hash: &[u8; HASH_LENGTH]) -> Result<Hash256, DecodingError> {
        let payload = self.serialize()?;
        transaction_hash(&payload, generation_hash)
            .ok_or_else(|| DecodingError::invalid("payload", "truncated signable part"))
    }

    fn write_signer(&self, out: &mut Vec<u8>) {
        match &self.envelope.signer {
            Some(account) => out.extend_from_slice(account.public_key.as_bytes()),
            None => out.extend_from_slice(&[0u8; PUBLIC_KEY_LENGTH]),
        }
    }
}

/// Computes a transaction hash from a serialized top-level payload:
/// `sha3(signature.R ‖ signer ‖ generation_hash ‖ signable)`.
///
/// Only the first half of the signature (R) is hashed, so the hash does
/// not depend on the S half. For aggregates the signable part stops after
/// the transactions hash, so cosignatures never change the hash. Returns
/// `None` for a payload shorter than the header.
pub fn transaction_hash(payload: &[u8], generation_hash: &[u8; HASH_LENGTH]) -> Option<Hash256> {
    if payload.len() < TRANSACTION_HEADER_SIZE {
        return None;
    }
    let signature_r = &payload[SIGNATURE_OFFSET..SIGNATURE_OFFSET + SIGNATURE_LENGTH / 2];
    let signer = &payload[SIGNER_OFFSET..SIGNER_OFFSET + PUBLIC_KEY_LENGTH];
    let type_code = u16::from_le_bytes([payload[SIGNABLE_OFFSET + 2], payload[SIGNABLE_OFFSET + 3]]);
    let is_aggregate = TransactionType::try_from(type_code)
        .map(TransactionType::is_aggregate)
        .unwrap_or(false);

    let signable = if is_aggregate {
        payload.get(SIGNABLE_OFFSET..SIGNABLE_OFFSET + AGGREGATE_SIGNABLE_LENGTH)?
    } else {
        &payload[SIGNABLE_OFFSET..]
    };
    Some(Hash256::from_bytes(sha3_256_multi(&[
        signature_r,
        signer,
        generation_hash,
        signable,
    ])))
}

/// Narrows a collection length to the width of its count field.
fn count<T: TryFrom<usize>>(len: usize, field: &'static str) -> Result<T, DecodingError> {
    T::try_from(len).map_err(|_| DecodingError::Oversized { field, len })
}

fn patch_size(out: &mut [u8]) -> Result<(), DecodingError> {
    let size: u32 = count(out.len(), "size")?;
    out[0..4].copy_from_slice(&size.to_le_bytes());
    Ok(())
}

fn padding(len: usize) -> usize {
    (EMBEDDED_ALIGNMENT - len % EMBEDDED_ALIGNMENT) % EMBEDDED_ALIGNMENT
}

fn write_address(address: &UnresolvedAddress, network: NetworkType, out: &mut Vec<u8>) {
    out.extend_from_slice(&address.to_bytes(network));
}

fn write_mosaic(mosaic: &Mosaic, out: &mut Vec<u8>) {
    out.extend_from_slice(&mosaic.id.to_u64().to_le_bytes());
    out.extend_from_slice(&mosaic.amount.to_le_bytes());
}

fn write_u64(value: u64, out: &mut Vec<u8>) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn write_metadata_value(delta: i16, value: &[u8], out: &mut Vec<u8>) -> Result<(), DecodingError> {
    let size: u16 = count(value.len(), "value")?;
    out.extend_from_slice(&delta.to_le_bytes());
    out.extend_from_slice(&size.to_le_bytes());
    out.extend_from_slice(value);
    Ok(())
}

fn write_counts(additions: usize, deletions: usize, out: &mut Vec<u8>) -> Result<(), DecodingError> {
    out.push(count(additions, "additions")?);
    out.push(count(deletions, "deletions")?);
    out.extend_from_slice(&0u32.to_le_bytes());
    Ok(())
}

fn write_body(body: &TransactionBody, network: NetworkType, out: &mut Vec<u8>) -> Result<(), DecodingError> {
    match body {
        TransactionBody::Transfer(b) => {
            let message = b.message.to_bytes();
            let message_size: u16 = count(message.len(), "message")?;
            write_address(&b.recipient, network, out);
            out.extend_from_slice(&message_size.to_le_bytes());
            out.push(count(b.mosaics.len(), "mosaics")?);
            out.extend_from_slice(&0u32.to_le_bytes());
            out.push(0);
            for mosaic in &b.mosaics {
                write_mosaic(mosaic, out);
            }
            out.extend_from_slice(&message);
        }
        TransactionBody::NamespaceRegistration(b) => {
            match b.registration {
                NamespaceRegistration::Root { duration } => write_u64(duration, out),
                NamespaceRegistration::Child { parent_id } => {
                    write_u64(parent_id.0, out)
                }
            }
            write_u64(b.id.0, out);
            out.push(b.registration.registration_type());
            out.push(count(b.name.len(), "name")?);
            out.extend_from_slice(b.name.as_bytes());
        }
        TransactionBody::AddressAlias(b) => {
            write_u64(b.namespace_id.0, out);
            out.extend_from_slice(b.address.as_bytes());
            out.push(b.action as u8);
        }
        TransactionBody::MosaicAlias(b) => {
            write_u64(b.namespace_id.0, out);
            write_u64(b.mosaic_id.0, out);
            out.push(b.action as u8);
        }
        TransactionBody::MosaicDefinition(b) => {
            write_u64(b.id.0, out);
            write_u64(b.duration, out);
            out.extend_from_slice(&b.nonce.to_le_bytes());
            out.push(b.flags);
            out.push(b.divisibility);
        }
        TransactionBody::MosaicSupplyChange(b) => {
            write_u64(b.mosaic_id.to_u64(), out);
            write_u64(b.delta, out);
            out.push(b.action as u8);
        }
        TransactionBody::MultisigAccountModification(b) => {
            out.push(b.min_removal_delta as u8);
            out.push(b.min_approval_delta as u8);
            write_counts(b.address_additions.len(), b.address_deletions.len(), out)?;
            for address in b.address_additions.iter().chain(&b.address_deletions) {
                write_address(address, network, out);
            }
        }
        TransactionBody::AggregateComplete(b) | TransactionBody::AggregateBonded(b) => {
            let embedded = b
                .transactions
                .iter()
                .map(Transaction::serialize_embedded)
                .collect::<Result<Vec<_>, _>>()?;
            let leaves: Vec<[u8; HASH_LENGTH]> = embedded.iter().map(|e| sha3_256(e)).collect();
            let payload_size: u32 = count(
                embedded.iter().map(|e| e.len() + padding(e.len())).sum(),
                "transactions",
            )?;

            out.extend_from_slice(&merkle_root(&leaves));
            out.extend_from_slice(&payload_size.to_le_bytes());
            out.extend_from_slice(&0u32.to_le_bytes());
            for bytes in &embedded {
                out.extend_from_slice(bytes);
                out.resize(out.len() + padding(bytes.len()), 0);
            }
            for cosignature in &b.cosignatures {
                write_u64(cosignature.version, out);
                out.extend_from_slice(cosignature.signer.public_key.as_bytes());
                out.extend_from_slice(cosignature.signature.as_bytes());
            }
        }
        TransactionBody::HashLock(b) => {
            write_mosaic(&b.mosaic, out);
            write_u64(b.duration, out);
            out.extend_from_slice(b.hash.as_bytes());
        }
        TransactionBody::SecretLock(b) => {
            write_address(&b.recipient, network, out);
            out.extend_from_slice(b.secret.as_bytes());
            write_mosaic(&b.mosaic, out);
            write_u64(b.duration, out);
            out.push(b.hash_algorithm);
        }
        TransactionBody::SecretProof(b) => {
            write_address(&b.recipient, network, out);
            out.extend_from_slice(b.secret.as_bytes());
            let proof_size: u16 = count(b.proof.len(), "proof")?;
            out.extend_from_slice(&proof_size.to_le_bytes());
            out.push(b.hash_algorithm);
            out.extend_from_slice(&b.proof);
        }
        TransactionBody::AccountAddressRestriction(b) => {
            out.extend_from_slice(&b.restriction_flags.to_le_bytes());
            write_counts(b.restriction_additions.len(), b.restriction_deletions.len(), out)?;
            for address in b.restriction_additions.iter().chain(&b.restriction_deletions) {
                write_address(address, network, out);
            }
        }
        TransactionBody::AccountMosaicRestriction(b) => {
            out.extend_from_slice(&b.restriction_flags.to_le_bytes());
            write_counts(b.restriction_additions.len(), b.restriction_deletions.len(), out)?;
            for id in b.restriction_additions.iter().chain(&b.restriction_deletions) {
                write_u64(id.to_u64(), out);
            }
        }
        TransactionBody::AccountOperationRestriction(b) => {
            out.extend_from_slice(&b.restriction_flags.to_le_bytes());
            write_counts(b.restriction_additions.len(), b.restriction_deletions.len(), out)?;
            for operation in b.restriction_additions.iter().chain(&b.restriction_deletions) {
                out.extend_from_slice(&operation.code().to_le_bytes());
            }
        }
        TransactionBody::AccountKeyLink(b)
        | TransactionBody::NodeKeyLink(b)
        | TransactionBody::VrfKeyLink(b) => {
            out.extend_from_slice(b.linked_public_key.as_bytes());
            out.push(b.link_action as u8);
        }
        TransactionBody::VotingKeyLink(b) => {
            out.extend_from_slice(b.linked_public_key.as_bytes());
            out.extend_from_slice(&b.start_epoch.to_le_bytes());
            out.extend_from_slice(&b.end_epoch.to_le_bytes());
            out.push(b.link_action as u8);
        }
        TransactionBody::MosaicGlobalRestriction(b) => {
            write_u64(b.mosaic_id.to_u64(), out);
            write_u64(b.reference_mosaic_id.to_u64(), out);
            write_u64(b.restriction_key, out);
            write_u64(b.previous_restriction_value, out);
            write_u64(b.new_restriction_value, out);
            out.push(b.previous_restriction_type);
            out.push(b.new_restriction_type);
        }
        TransactionBody::MosaicAddressRestriction(b) => {
            write_u64(b.mosaic_id.to_u64(), out);
            write_u64(b.restriction_key, out);
            write_u64(b.previous_restriction_value, out);
            write_u64(b.new_restriction_value, out);
            write_address(&b.target_address, network, out);
        }
        TransactionBody::AccountMetadata(b) => {
            write_address(&b.target_address, network, out);
            write_u64(b.scoped_metadata_key, out);
            write_metadata_value(b.value_size_delta, &b.value, out)?;
        }
        TransactionBody::MosaicMetadata(b) => {
            write_address(&b.target_address, network, out);
            write_u64(b.scoped_metadata_key, out);
            write_u64(b.target_mosaic_id.to_u64(), out);
            write_metadata_value(b.value_size_delta, &b.value, out)?;
        }
        TransactionBody::NamespaceMetadata(b) => {
            write_address(&b.target_address, network, out);
            write_u64(b.scoped_metadata_key, out);
            write_u64(b.target_namespace_id.0, out);
            write_metadata_value(b.value_size_delta, &b.value, out)?;
        }
    }
    Ok(())
}
