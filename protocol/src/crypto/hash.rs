//! # Hashing Utilities
//!
//! Catapult hashes everything that matters with SHA3-256: transaction
//! hashes, embedded transaction leaves, aggregate transaction roots, and
//! secret-lock secrets. There is exactly one hash family here on purpose;
//! a second one would only be a second way to compute the wrong hash.
//!
//! ## Merkle roots
//!
//! The aggregate `transactions_hash` is a binary Merkle root over the SHA3
//! hashes of the embedded transactions. Odd levels duplicate their last
//! node. A single leaf is its own root, and an empty tree is all zeros.

use sha3::{Digest, Sha3_256};

use crate::config::HASH_LENGTH;

/// Compute the SHA3-256 hash of the input data.
///
/// # Example
///
/// ```
/// use catena_protocol::crypto::sha3_256;
///
/// let hash = sha3_256(b"catapult");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; HASH_LENGTH] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple byte slices together without concatenating them first.
///
/// Transaction hashes are computed over four disjoint pieces (signature,
/// signer, generation hash, signable payload); feeding them straight into
/// the hasher avoids building a temporary buffer.
pub fn sha3_256_multi(parts: &[&[u8]]) -> [u8; HASH_LENGTH] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Compute a catapult Merkle root from a list of leaf hashes.
///
/// Returns all zeros for an empty list and the leaf itself for a single
/// leaf. On odd levels the last node is paired with itself.
pub fn merkle_root(leaves: &[[u8; HASH_LENGTH]]) -> [u8; HASH_LENGTH] {
    if leaves.is_empty() {
        return [0u8; HASH_LENGTH];
    }

    let mut current_level: Vec<[u8; HASH_LENGTH]> = leaves.to_vec();

    while current_level.len() > 1 {
        let mut next_level = Vec::with_capacity((current_level.len() + 1) / 2);

        for chunk in current_level.chunks(2) {
            let left = &chunk[0];
            let right = chunk.get(1).unwrap_or(left);
            next_level.push(sha3_256_multi(&[left.as_slice(), right.as_slice()]));
        }

        current_level = next_level;
    }

    current_level[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_256_known_vector() {
        let hash = sha3_256(b"");
        let expected =
            hex::decode("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a")
                .unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn sha3_deterministic() {
        let a = sha3_256(b"catena");
        let b = sha3_256(b"catena");
        assert_eq!(a, b);
        assert_ne!(a, sha3_256(b"Catena"));
    }

    #[test]
    fn test_sha3_256_multi_matches_concatenation() {
        let multi = sha3_256_multi(&[b"hello", b" ", b"world"]);
        assert_eq!(multi, sha3_256(b"hello world"));
    }

    #[test]
    fn test_merkle_root_empty() {
        assert_eq!(merkle_root(&[]), [0u8; 32]);
    }

    #[test]
    fn test_merkle_root_single_leaf_is_leaf() {
        let leaf = sha3_256(b"only child");
        assert_eq!(merkle_root(&[leaf]), leaf);
    }

    #[test]
    fn test_merkle_root_two_leaves() {
        let left = sha3_256(b"left");
        let right = sha3_256(b"right");
        let expected = sha3_256_multi(&[left.as_slice(), right.as_slice()]);
        assert_eq!(merkle_root(&[left, right]), expected);
    }

    #[test]
    fn test_merkle_root_odd_count_duplicates_last() {
        let leaves: Vec<[u8; 32]> = (0u8..3).map(|i| sha3_256(&[i])).collect();
        let ab = sha3_256_multi(&[leaves[0].as_slice(), leaves[1].as_slice()]);
        let cc = sha3_256_multi(&[leaves[2].as_slice(), leaves[2].as_slice()]);
        let expected = sha3_256_multi(&[ab.as_slice(), cc.as_slice()]);
        assert_eq!(merkle_root(&leaves), expected);
    }

    #[test]
    fn test_merkle_root_order_matters() {
        let first = sha3_256(b"first");
        let second = sha3_256(b"second");
        assert_ne!(merkle_root(&[first, second]), merkle_root(&[second, first]));
    }
}
