//! # Content Hashing
//!
//! SHA-256 helpers. All content addressing in Parcel-Chain goes through
//! these functions so identical bytes always produce identical identifiers.

use crate::entities::Hash;
use sha2::{Digest, Sha256};

/// All-zero hash, used as the fixed seed for genesis links.
pub const ZERO_HASH: Hash = [0u8; 32];

/// Hash raw bytes.
pub fn content_hash(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Hash a sequence of byte slices under a domain-separation tag.
///
/// Each part is length-prefixed so `["ab", "c"]` and `["a", "bc"]` never
/// collide.
pub fn tagged_hash(tag: &[u8], parts: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update((tag.len() as u64).to_be_bytes());
    hasher.update(tag);
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// First four bytes of a hash as hex, for log lines.
pub fn short_hex(hash: &Hash) -> String {
    hex::encode(&hash[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_is_stable() {
        let a = content_hash(b"deed.pdf");
        let b = content_hash(b"deed.pdf");
        assert_eq!(a, b);
        assert_ne!(a, content_hash(b"title.pdf"));
    }

    #[test]
    fn test_content_hash_known_vector() {
        assert_eq!(
            hex::encode(content_hash(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_tagged_hash_length_prefix() {
        let left = tagged_hash(b"t", &[b"ab", b"c"]);
        let right = tagged_hash(b"t", &[b"a", b"bc"]);
        assert_ne!(left, right);
    }

    #[test]
    fn test_tagged_hash_domain_separation() {
        assert_ne!(tagged_hash(b"one", &[b"x"]), tagged_hash(b"two", &[b"x"]));
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(short_hex(&[0xAB; 32]), "abababab");
    }
}
