//! Binary writer implementation for Neo.
//!
//! This module provides a binary writer for serializing Neo data
//! structures, little-endian throughout with Neo var-int framing.

use crate::{Error, Result};
use bytes::{BufMut, BytesMut};

/// A writer for serializing Neo data structures to binary data.
#[derive(Default)]
pub struct BinaryWriter {
    /// The buffer being written to
    buffer: BytesMut,
}

impl BinaryWriter {
    /// Creates a new binary writer.
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::new(),
        }
    }

    /// Creates a new binary writer with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Returns the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buffer.put_u8(value);
        Ok(())
    }

    /// Writes a boolean as a single byte.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    /// Writes an unsigned 16-bit integer, little-endian.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.buffer.put_u16_le(value);
        Ok(())
    }

    /// Writes an unsigned 32-bit integer, little-endian.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.buffer.put_u32_le(value);
        Ok(())
    }

    /// Writes an unsigned 64-bit integer, little-endian.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.buffer.put_u64_le(value);
        Ok(())
    }

    /// Writes a signed 32-bit integer, little-endian.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.buffer.put_i32_le(value);
        Ok(())
    }

    /// Writes a signed 64-bit integer, little-endian.
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.buffer.put_i64_le(value);
        Ok(())
    }

    /// Writes raw bytes without any framing.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.put_slice(data);
        Ok(())
    }

    /// Writes a Neo variable-length integer.
    pub fn write_var_int(&mut self, value: u64) -> Result<()> {
        match value {
            0..=0xFC => self.write_u8(value as u8),
            0xFD..=0xFFFF => {
                self.write_u8(0xFD)?;
                self.write_u16(value as u16)
            }
            0x1_0000..=0xFFFF_FFFF => {
                self.write_u8(0xFE)?;
                self.write_u32(value as u32)
            }
            _ => {
                self.write_u8(0xFF)?;
                self.write_u64(value)
            }
        }
    }

    /// Writes a byte slice prefixed with its var-int length.
    pub fn write_var_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.write_var_int(data.len() as u64)?;
        self.write_bytes(data)
    }

    /// Writes a UTF-8 string prefixed with its var-int byte length.
    pub fn write_var_string(&mut self, value: &str) -> Result<()> {
        self.write_var_bytes(value.as_bytes())
    }

    /// Writes a string into a fixed-size zero-padded field.
    pub fn write_fixed_string(&mut self, value: &str, length: usize) -> Result<()> {
        let bytes = value.as_bytes();
        if bytes.len() > length {
            return Err(Error::Serialization(format!(
                "String too long for fixed field: {} > {}",
                bytes.len(),
                length
            )));
        }
        self.write_bytes(bytes)?;
        for _ in bytes.len()..length {
            self.write_u8(0)?;
        }
        Ok(())
    }

    /// Consumes the writer and returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.freeze().to_vec()
    }

    /// Returns a copy of the written bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_vec()
    }
}
