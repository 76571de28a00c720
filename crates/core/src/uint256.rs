// Copyright (C) 2015-2025 The Neo Project.
//
// uint256.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Implementation of UInt256, a 256-bit unsigned integer.

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The length of UInt256 values in bytes.
pub const UINT256_SIZE: usize = 32;

/// Represents a 256-bit unsigned integer, used for transaction and block
/// hashes.
///
/// Bytes are stored in little-endian order; the hexadecimal string form is
/// big-endian with a `0x` prefix, matching the C# implementation.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct UInt256([u8; UINT256_SIZE]);

impl UInt256 {
    /// Creates a new zero-valued UInt256.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a zero UInt256.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Checks if this UInt256 is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Creates a UInt256 from a little-endian byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != UINT256_SIZE {
            return Err(CoreError::invalid_format(format!(
                "Invalid UInt256 length: expected {}, got {}",
                UINT256_SIZE,
                bytes.len()
            )));
        }
        let mut value = [0u8; UINT256_SIZE];
        value.copy_from_slice(bytes);
        Ok(Self(value))
    }

    /// Returns the little-endian byte representation.
    pub fn as_bytes(&self) -> &[u8; UINT256_SIZE] {
        &self.0
    }

    /// Returns the big-endian byte representation (matches C# hash wire
    /// order used for nonce seeding and display).
    pub fn to_be_bytes(&self) -> [u8; UINT256_SIZE] {
        let mut be = self.0;
        be.reverse();
        be
    }

    /// Parses a UInt256 from its big-endian hexadecimal string form,
    /// with or without the `0x` prefix.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != UINT256_SIZE * 2 {
            return Err(CoreError::invalid_format(format!(
                "Invalid UInt256 string length: {}",
                s.len()
            )));
        }
        let mut value: [u8; UINT256_SIZE] = hex::decode(s)
            .map_err(|e| CoreError::invalid_format(e.to_string()))?
            .try_into()
            .map_err(|_| CoreError::invalid_format("Invalid UInt256 hex"))?;
        value.reverse();
        Ok(Self(value))
    }
}

impl From<[u8; UINT256_SIZE]> for UInt256 {
    fn from(value: [u8; UINT256_SIZE]) -> Self {
        Self(value)
    }
}

impl FromStr for UInt256 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for UInt256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for UInt256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_be_bytes()))
    }
}

impl fmt::Debug for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt256({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        let s = "0xe3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        let value = UInt256::parse(s).unwrap();
        assert_eq!(value.to_string(), s);
        assert_eq!(value.to_be_bytes()[0], 0xe3);
        assert_eq!(value.as_bytes()[0], 0x55);
    }

    #[test]
    fn test_zero() {
        assert!(UInt256::zero().is_zero());
        assert!(!UInt256::from([1u8; 32]).is_zero());
    }
}
