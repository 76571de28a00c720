// Copyright (C) 2015-2025 The Neo Project.
//
// uint160.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Implementation of UInt160, a 160-bit unsigned integer.

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The length of UInt160 values in bytes.
pub const UINT160_SIZE: usize = 20;

/// Represents a 160-bit unsigned integer, used for script hashes and
/// account addresses.
///
/// Bytes are stored in little-endian order; the hexadecimal string form is
/// big-endian with a `0x` prefix, matching the C# implementation.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct UInt160([u8; UINT160_SIZE]);

impl UInt160 {
    /// Creates a new zero-valued UInt160.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a zero UInt160.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Checks if this UInt160 is zero (matches C# IsZero property).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Creates a UInt160 from a little-endian byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != UINT160_SIZE {
            return Err(CoreError::invalid_format(format!(
                "Invalid UInt160 length: expected {}, got {}",
                UINT160_SIZE,
                bytes.len()
            )));
        }
        let mut value = [0u8; UINT160_SIZE];
        value.copy_from_slice(bytes);
        Ok(Self(value))
    }

    /// Returns the little-endian byte representation.
    pub fn as_bytes(&self) -> &[u8; UINT160_SIZE] {
        &self.0
    }

    /// Returns the little-endian bytes as an owned array.
    pub fn to_array(&self) -> [u8; UINT160_SIZE] {
        self.0
    }

    /// Parses a UInt160 from its big-endian hexadecimal string form,
    /// with or without the `0x` prefix (matches C# UInt160.Parse).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != UINT160_SIZE * 2 {
            return Err(CoreError::invalid_format(format!(
                "Invalid UInt160 string length: {}",
                s.len()
            )));
        }
        let mut value: [u8; UINT160_SIZE] = hex::decode(s)
            .map_err(|e| CoreError::invalid_format(e.to_string()))?
            .try_into()
            .map_err(|_| CoreError::invalid_format("Invalid UInt160 hex"))?;
        value.reverse();
        Ok(Self(value))
    }
}

impl From<[u8; UINT160_SIZE]> for UInt160 {
    fn from(value: [u8; UINT160_SIZE]) -> Self {
        Self(value)
    }
}

impl FromStr for UInt160 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for UInt160 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Most significant byte is last in the little-endian layout.
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for UInt160 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut be = self.0;
        be.reverse();
        write!(f, "0x{}", hex::encode(be))
    }
}

impl fmt::Debug for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt160({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert!(UInt160::zero().is_zero());
        assert_eq!(UInt160::new(), UInt160::default());
    }

    #[test]
    fn test_parse_round_trip() {
        let s = "0xcc5e4edd9f5f8dba8bb65734541df7a1c081c67b";
        let value = UInt160::parse(s).unwrap();
        assert_eq!(value.to_string(), s);
        // Display is big-endian, storage is little-endian.
        assert_eq!(value.as_bytes()[0], 0x7b);
        assert_eq!(value.as_bytes()[19], 0xcc);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(UInt160::parse("0x1234").is_err());
        assert!(UInt160::parse("zz5e4edd9f5f8dba8bb65734541df7a1c081c67b").is_err());
    }

    #[test]
    fn test_from_bytes_length_check() {
        assert!(UInt160::from_bytes(&[0u8; 19]).is_err());
        assert!(UInt160::from_bytes(&[0u8; 20]).is_ok());
    }

    #[test]
    fn test_ordering_is_big_endian() {
        let mut small = [0u8; UINT160_SIZE];
        let mut big = [0u8; UINT160_SIZE];
        small[0] = 0xFF; // low byte
        big[19] = 0x01; // high byte
        assert!(UInt160::from(small) < UInt160::from(big));
    }
}
