//! Block container type consumed by the script runtime.
//!
//! Models the header fields scripts can observe while the block is being
//! persisted. Full block serialization and validation live outside this
//! crate.

use crate::uint256::UInt256;

/// The subset of a Neo block visible to executing scripts.
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// The block hash, fixed at construction.
    hash: UInt256,
    /// The height of the block in the chain.
    pub index: u32,
    /// The consensus nonce of the block.
    pub nonce: u64,
    /// The creation time, in milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// The hash of the previous block.
    pub prev_hash: UInt256,
}

impl Block {
    /// Creates a block with the given hash, index and nonce.
    pub fn new(hash: UInt256, index: u32, nonce: u64) -> Self {
        Self {
            hash,
            index,
            nonce,
            ..Default::default()
        }
    }

    /// The block hash.
    pub fn hash(&self) -> UInt256 {
        self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_fields() {
        let hash = UInt256::from([7u8; 32]);
        let block = Block::new(hash, 100, 0xdead_beef);
        assert_eq!(block.hash(), hash);
        assert_eq!(block.index, 100);
        assert_eq!(block.nonce, 0xdead_beef);
    }
}
