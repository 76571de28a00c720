//! Stack item types for the Neo Virtual Machine.
//!
//! A reduced item model covering the values that cross the interop
//! boundary: native method arguments and results, notification payloads
//! and syscall operands.

use crate::error::{VmError, VmResult};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// A value on the VM evaluation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackItem {
    /// The absence of a value.
    Null,
    /// A boolean value.
    Boolean(bool),
    /// An arbitrary precision integer.
    Integer(BigInt),
    /// An immutable byte string.
    ByteString(Vec<u8>),
    /// An ordered collection of items.
    Array(Vec<StackItem>),
}

impl StackItem {
    /// Creates an integer item from any primitive integer.
    pub fn from_int<T: Into<BigInt>>(value: T) -> Self {
        StackItem::Integer(value.into())
    }

    /// Creates a byte-string item.
    pub fn from_byte_string(data: impl Into<Vec<u8>>) -> Self {
        StackItem::ByteString(data.into())
    }

    /// The type name used in conversion diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            StackItem::Null => "Null",
            StackItem::Boolean(_) => "Boolean",
            StackItem::Integer(_) => "Integer",
            StackItem::ByteString(_) => "ByteString",
            StackItem::Array(_) => "Array",
        }
    }

    /// Interprets the item as an integer.
    pub fn as_int(&self) -> VmResult<BigInt> {
        match self {
            StackItem::Integer(value) => Ok(value.clone()),
            StackItem::Boolean(b) => Ok(BigInt::from(u8::from(*b))),
            other => Err(VmError::InvalidType {
                from: other.type_name().to_string(),
                to: "Integer".to_string(),
            }),
        }
    }

    /// Interprets the item as an `i64`, rejecting out-of-range integers.
    pub fn as_i64(&self) -> VmResult<i64> {
        self.as_int()?.to_i64().ok_or_else(|| VmError::InvalidType {
            from: "Integer".to_string(),
            to: "i64".to_string(),
        })
    }

    /// Interprets the item as a byte string.
    pub fn as_bytes(&self) -> VmResult<Vec<u8>> {
        match self {
            StackItem::ByteString(data) => Ok(data.clone()),
            other => Err(VmError::InvalidType {
                from: other.type_name().to_string(),
                to: "ByteString".to_string(),
            }),
        }
    }

    /// Interprets the item as a UTF-8 string.
    pub fn as_string(&self) -> VmResult<String> {
        String::from_utf8(self.as_bytes()?).map_err(|_| VmError::InvalidType {
            from: "ByteString".to_string(),
            to: "String".to_string(),
        })
    }

    /// Interprets the item as an array of items.
    pub fn as_array(&self) -> VmResult<Vec<StackItem>> {
        match self {
            StackItem::Array(items) => Ok(items.clone()),
            other => Err(VmError::InvalidType {
                from: other.type_name().to_string(),
                to: "Array".to_string(),
            }),
        }
    }
}

impl Default for StackItem {
    fn default() -> Self {
        StackItem::Null
    }
}
