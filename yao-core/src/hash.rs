//! Hashing helpers built on blake3.

use serde::{Deserialize, Serialize};

use crate::Block;

/// A 32-byte blake3 digest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash([u8; 32]);

impl Hash {
    /// Computes the digest of `data`.
    pub fn digest(data: &[u8]) -> Self {
        Self(blake3::hash(data).into())
    }

    /// Returns the digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Hash {
    fn from(value: [u8; 32]) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Hashes a block together with an index, truncated to a block.
///
/// The index domain-separates blocks that belong to different wires.
pub fn hash_block(block: Block, index: u64) -> Block {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&index.to_le_bytes());
    hasher.update(block.as_ref());
    let digest: [u8; 32] = hasher.finalize().into();
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest[..16]);
    Block::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_block_domain_separation() {
        let b = Block::new([1; 16]);
        assert_ne!(hash_block(b, 0), hash_block(b, 1));
        assert_eq!(hash_block(b, 5), hash_block(b, 5));
    }

    #[test]
    fn test_display_is_hex() {
        let h = Hash::from([0xab; 32]);
        assert_eq!(h.to_string(), "ab".repeat(32));
    }
}
