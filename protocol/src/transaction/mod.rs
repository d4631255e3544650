//! # Transaction Module
//!
//! Typed transactions decoded from REST records, and their binary form.
//!
//! ## Architecture
//!
//! ```text
//! types.rs         TransactionType (closed kind set) and small action enums
//! ids.rs           MosaicId, NamespaceId and the unresolved (alias) forms
//! message.rs       Transfer messages
//! envelope.rs      Envelope, Deadline, TransactionInfo
//! body.rs          Transaction and one body struct per kind
//! factory.rs       decode(): REST record -> Transaction
//! serialization.rs Transaction -> bytes, transaction hash
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Decode** a record with [`decode`].
//! 2. **Verify** its carried size with [`Transaction::size_matches`].
//! 3. **Resolve** aliases through [`crate::receipt::TransactionService`].
//!
//! ## Design Decisions
//!
//! - Dispatch over kinds is a single exhaustive `match`. An unknown type
//!   code fails before it, so no kind is ever skipped silently.
//! - Inner transactions of an aggregate receive the aggregate's deadline,
//!   fee and signature as an explicit argument. Input records are only
//!   ever borrowed.
//! - All 64-bit quantities are parsed as integers; no floating point
//!   anywhere near amounts or ids.

pub mod body;
pub mod envelope;
pub mod error;
pub mod factory;
pub mod ids;
pub mod message;
pub mod serialization;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use body::{
    AccountMetadataBody, AccountRestrictionBody, AddressAliasBody, AggregateBody, Cosignature,
    HashLockBody, KeyLinkBody, MosaicAddressRestrictionBody, MosaicAliasBody,
    MosaicDefinitionBody, MosaicGlobalRestrictionBody, MosaicMetadataBody,
    MosaicSupplyChangeBody, MultisigAccountModificationBody, NamespaceMetadataBody,
    NamespaceRegistration, NamespaceRegistrationBody, SecretLockBody, SecretProofBody,
    Transaction, TransactionBody, TransferBody, VotingKeyLinkBody,
};
pub use envelope::{Deadline, Envelope, InheritedEnvelope, TransactionInfo};
pub use error::DecodingError;
pub use factory::{decode, decode_all, extract_recipient};
pub use ids::{Mosaic, MosaicId, NamespaceId, UnresolvedAddress, UnresolvedMosaicId};
pub use message::Message;
pub use serialization::transaction_hash;
pub use types::{LinkAction, MosaicSupplyChangeAction, TransactionType, UnknownTransactionType};
