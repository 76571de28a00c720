//! Serialization trait for Neo data structures.

use crate::{BinaryWriter, MemoryReader, Result};

/// A type with a canonical Neo binary representation.
pub trait Serializable: Sized {
    /// Writes the value to the given writer.
    fn serialize(&self, writer: &mut BinaryWriter) -> Result<()>;

    /// Reads a value from the given reader.
    fn deserialize(reader: &mut MemoryReader) -> Result<Self>;

    /// Serializes the value to a byte vector.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = BinaryWriter::new();
        self.serialize(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Deserializes a value from a byte slice.
    fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = MemoryReader::new(data);
        Self::deserialize(&mut reader)
    }
}
