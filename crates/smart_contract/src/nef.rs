//! NEO Executable Format 3 (NEF3) envelope.
//!
//! Standard: https://github.com/neo-project/proposals/pull/121/files
//!
//! ```text
//! +------------+-----------+---------------------------------------------+
//! |   Field    |  Length   |                  Comment                    |
//! +------------+-----------+---------------------------------------------+
//! | Magic      | 4 bytes   | Magic header                                |
//! | Compiler   | 64 bytes  | Compiler used and its version               |
//! | Source     | Var bytes | Source file URL                             |
//! | Reserved   | 1 byte    | Reserved for extensions. Must be 0.         |
//! | Tokens     | Var array | List of method tokens                       |
//! | Reserved   | 2 bytes   | Reserved for extensions. Must be 0.         |
//! | Script     | Var bytes | The contract bytecode                       |
//! | Checksum   | 4 bytes   | First 4 bytes of double SHA-256 of the rest |
//! +------------+-----------+---------------------------------------------+
//! ```
//!
//! The NEF is stored in the contract state and feeds the contract hash,
//! so every byte here is consensus-visible.

use crate::{Error, Result};
use neo_core::crypto_utils::hash256;
use neo_core::UInt160;
use neo_io::{BinaryWriter, MemoryReader, Serializable};
use neo_vm::CallFlags;

/// The NEF3 magic header, "NEF3" in little-endian.
pub const NEF_MAGIC: u32 = 0x3346454E;

/// The size of the fixed, zero-padded compiler field.
pub const COMPILER_FIELD_SIZE: usize = 64;

/// Maximum length of the source URL field.
pub const MAX_SOURCE_URL_LENGTH: usize = 256;

/// Maximum serialized NEF size, bounded by the VM item size limit.
pub const MAX_NEF_SIZE: usize = 0x10_0000;

/// A static call target bound into the script at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodToken {
    /// The hash of the called contract.
    pub hash: UInt160,
    /// The name of the called method.
    pub method: String,
    /// The number of parameters passed.
    pub parameters_count: u16,
    /// Whether the call leaves a value on the stack.
    pub has_return_value: bool,
    /// The flags the call is performed with.
    pub call_flags: CallFlags,
}

impl Serializable for MethodToken {
    fn serialize(&self, writer: &mut BinaryWriter) -> neo_io::Result<()> {
        writer.write_bytes(self.hash.as_bytes())?;
        writer.write_var_string(&self.method)?;
        writer.write_u16(self.parameters_count)?;
        writer.write_bool(self.has_return_value)?;
        writer.write_u8(self.call_flags.bits())
    }

    fn deserialize(reader: &mut MemoryReader) -> neo_io::Result<Self> {
        let hash = UInt160::from_bytes(&reader.read_bytes(20)?)
            .map_err(|e| neo_io::Error::Deserialization(e.to_string()))?;
        let method = reader.read_var_string(32)?;
        let parameters_count = reader.read_u16()?;
        let has_return_value = reader.read_bool()?;
        let call_flags = CallFlags::from_bits(reader.read_u8()?)
            .ok_or_else(|| neo_io::Error::InvalidFormat("Invalid call flags".to_string()))?;
        Ok(Self {
            hash,
            method,
            parameters_count,
            has_return_value,
            call_flags,
        })
    }
}

/// A parsed NEF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NefFile {
    /// Compiler name and version, at most 64 bytes of UTF-8.
    pub compiler: String,
    /// Source file URL, possibly empty.
    pub source: String,
    /// Static call targets; empty for native stubs, never null when
    /// rendered to JSON.
    pub tokens: Vec<MethodToken>,
    /// The contract bytecode.
    pub script: Vec<u8>,
    /// Checksum over all preceding fields.
    pub checksum: u32,
}

impl NefFile {
    /// Creates a NEF around the given script and computes its checksum.
    pub fn new(compiler: impl Into<String>, script: Vec<u8>) -> Result<Self> {
        let mut file = Self {
            compiler: compiler.into(),
            source: String::new(),
            tokens: Vec::new(),
            script,
            checksum: 0,
        };
        if file.compiler.len() > COMPILER_FIELD_SIZE {
            return Err(Error::invalid_operation("Too long compiler field"));
        }
        file.checksum = file.calculate_checksum()?;
        Ok(file)
    }

    /// Computes the canonical checksum: the first four little-endian
    /// bytes of the double SHA-256 of the serialized file minus the
    /// checksum itself. Must be recomputed whenever the script changes.
    pub fn calculate_checksum(&self) -> Result<u32> {
        let bytes = self.to_bytes()?;
        let body = &bytes[..bytes.len() - 4];
        let digest = hash256(body);
        Ok(u32::from_le_bytes([
            digest[0], digest[1], digest[2], digest[3],
        ]))
    }

    /// Serializes the file, verifying the size bound.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = Serializable::to_bytes(self)?;
        if bytes.len() > MAX_NEF_SIZE {
            return Err(Error::invalid_operation(format!(
                "Serialized NEF size exceeds VM item limits: {} bytes allowed at max, got {}",
                MAX_NEF_SIZE,
                bytes.len()
            )));
        }
        Ok(bytes)
    }

    /// Parses and validates a NEF file, including its checksum.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() > MAX_NEF_SIZE {
            return Err(Error::invalid_operation(format!(
                "Invalid NEF file size: expected {} at max, got {}",
                MAX_NEF_SIZE,
                data.len()
            )));
        }
        let file: Self = Serializable::from_bytes(data)?;
        if file.calculate_checksum()? != file.checksum {
            return Err(Error::invalid_operation("Checksum verification failure"));
        }
        Ok(file)
    }
}

impl Serializable for NefFile {
    fn serialize(&self, writer: &mut BinaryWriter) -> neo_io::Result<()> {
        writer.write_u32(NEF_MAGIC)?;
        writer.write_fixed_string(&self.compiler, COMPILER_FIELD_SIZE)?;
        writer.write_var_string(&self.source)?;
        writer.write_u8(0)?;
        writer.write_var_int(self.tokens.len() as u64)?;
        for token in &self.tokens {
            token.serialize(writer)?;
        }
        writer.write_u16(0)?;
        writer.write_var_bytes(&self.script)?;
        writer.write_u32(self.checksum)
    }

    fn deserialize(reader: &mut MemoryReader) -> neo_io::Result<Self> {
        let magic = reader.read_u32()?;
        if magic != NEF_MAGIC {
            return Err(neo_io::Error::InvalidFormat("Invalid magic".to_string()));
        }
        let compiler = reader.read_fixed_string(COMPILER_FIELD_SIZE)?;
        let source = reader.read_var_string(MAX_SOURCE_URL_LENGTH)?;
        if reader.read_u8()? != 0 {
            return Err(neo_io::Error::InvalidFormat(
                "Reserved byte must be 0".to_string(),
            ));
        }
        let token_count = reader.read_var_int(128)? as usize;
        let mut tokens = Vec::with_capacity(token_count);
        for _ in 0..token_count {
            tokens.push(MethodToken::deserialize(reader)?);
        }
        if reader.read_u16()? != 0 {
            return Err(neo_io::Error::InvalidFormat(
                "Reserved bytes must be 0".to_string(),
            ));
        }
        let script = reader.read_var_bytes(MAX_NEF_SIZE)?;
        if script.is_empty() {
            return Err(neo_io::Error::InvalidFormat("Empty script".to_string()));
        }
        let checksum = reader.read_u32()?;
        Ok(Self {
            compiler,
            source,
            tokens,
            script,
            checksum,
        })
    }
}
