//! # Cryptographic Primitives
//!
//! Hashing only. Signing and verification are performed by whoever holds
//! the keys; this crate receives signatures and public keys as opaque
//! bytes and never touches private key material.

pub mod hash;

pub use hash::{merkle_root, sha3_256, sha3_256_multi};
