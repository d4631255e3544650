//! # Account Module
//!
//! Who signs and who receives. Catapult identifies participants by their
//! Ed25519 public key and by a 24-byte address derived from it:
//!
//! ```text
//! network byte (1) || ripemd160(sha3(public_key)) (20) || checksum (3)
//! ```
//!
//! Address derivation belongs to the key-management layer and is not
//! performed here; addresses arrive already encoded on the wire, and a
//! [`SignedTransaction`](crate::network::SignedTransaction) carries its
//! signer address alongside the signer key.
//!
//! ## Formats
//!
//! - **Encoded**: 48 uppercase hex characters, as REST serves them.
//! - **Plain**: 39 base32 characters (`TB6Q5E...`), what users paste.

pub mod address;
pub mod keys;
pub mod network;

pub use address::{Address, AddressError};
pub use keys::{Hash256, InvalidHexLength, PublicAccount, PublicKey, Signature};
pub use network::NetworkType;
