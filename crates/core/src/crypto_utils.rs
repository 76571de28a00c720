//! Core hashing helpers shared by the script runtime.
//!
//! This module provides the hash functions used for contract hashes,
//! checksums and syscall identifiers.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Calculates the SHA-256 hash of the input.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Calculates the double SHA-256 hash of the input.
/// This matches the C# Crypto.Hash256 implementation exactly.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Calculates the 160-bit hash of the input: RIPEMD160(SHA256(data)).
/// This matches the C# Crypto.Hash160 implementation exactly.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(sha256(data));
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash160_empty() {
        assert_eq!(
            hex::encode(hash160(b"")),
            "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"
        );
    }

    #[test]
    fn test_hash256_is_double_sha() {
        let once = sha256(b"neo");
        assert_eq!(hash256(b"neo"), sha256(&once));
    }
}
