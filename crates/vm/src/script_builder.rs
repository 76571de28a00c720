//! Incremental assembly of VM scripts.
//!
//! Native contract stubs and contract-hash preimages are emitted through
//! this builder, so the integer and data push encodings here are
//! consensus visible and must stay byte-compatible with the C#
//! `ScriptBuilder`.

use crate::error::{VmError, VmResult};
use crate::op_code::OpCode;
use sha2::{Digest, Sha256};

/// Longest syscall name accepted by [`ScriptBuilder::hash_syscall`].
pub const MAX_SYSCALL_NAME_LEN: usize = 252;

/// Assembles a byte-code script instruction by instruction.
#[derive(Default)]
pub struct ScriptBuilder {
    script: Vec<u8>,
}

impl ScriptBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self { script: Vec::new() }
    }

    /// Appends one raw byte.
    #[inline]
    pub fn emit(&mut self, op: u8) -> &mut Self {
        self.script.push(op);
        self
    }

    /// Appends a bare opcode.
    #[inline]
    pub fn emit_opcode(&mut self, op: OpCode) -> &mut Self {
        self.script.push(op as u8);
        self
    }

    /// Appends raw bytes without any framing.
    #[inline]
    pub fn emit_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.script.extend_from_slice(bytes);
        self
    }

    /// Appends an opcode together with its operand bytes.
    #[inline]
    pub fn emit_instruction(&mut self, opcode: OpCode, operand: &[u8]) -> &mut Self {
        self.emit_opcode(opcode);
        self.emit_bytes(operand)
    }

    /// Appends a data push, choosing the shortest PUSHDATA form. Small
    /// payloads always go through PUSHDATA1, never the PUSH0..PUSH16
    /// shortcuts; the C# encoder does the same and hashes depend on it.
    pub fn emit_push(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();

        if len <= 0xFF {
            self.emit_opcode(OpCode::PUSHDATA1);
            self.emit(len as u8);
        } else if len <= 0xFFFF {
            self.emit_opcode(OpCode::PUSHDATA2);
            self.emit_bytes(&(len as u16).to_le_bytes());
        } else {
            self.emit_opcode(OpCode::PUSHDATA4);
            self.emit_bytes(&(len as u32).to_le_bytes());
        }
        self.script.extend_from_slice(data);
        self
    }

    /// Appends an integer push: the PUSHM1/PUSH0..PUSH16 shortcuts for
    /// small values, the narrowest PUSHINT form otherwise.
    pub fn emit_push_int(&mut self, value: i64) -> &mut Self {
        if value == -1 {
            return self.emit_opcode(OpCode::PUSHM1);
        }
        if (0..=16).contains(&value) {
            return self.emit(OpCode::PUSH0 as u8 + value as u8);
        }

        let bytes = value.to_le_bytes();
        if (i64::from(i8::MIN)..=i64::from(i8::MAX)).contains(&value) {
            self.emit_instruction(OpCode::PUSHINT8, &bytes[..1])
        } else if (i64::from(i16::MIN)..=i64::from(i16::MAX)).contains(&value) {
            self.emit_instruction(OpCode::PUSHINT16, &bytes[..2])
        } else if (i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&value) {
            self.emit_instruction(OpCode::PUSHINT32, &bytes[..4])
        } else {
            self.emit_instruction(OpCode::PUSHINT64, &bytes)
        }
    }

    /// Appends a boolean push.
    #[inline]
    pub fn emit_push_bool(&mut self, value: bool) -> &mut Self {
        if value {
            self.emit_opcode(OpCode::PUSHT)
        } else {
            self.emit_opcode(OpCode::PUSHF)
        }
    }

    /// Appends a UTF-8 string push.
    #[inline]
    pub fn emit_push_string(&mut self, value: &str) -> &mut Self {
        self.emit_push(value.as_bytes())
    }

    /// Appends a syscall referenced by its qualified name.
    pub fn emit_syscall(&mut self, api: &str) -> VmResult<&mut Self> {
        let id = Self::hash_syscall(api)?;
        Ok(self.emit_syscall_hash(id))
    }

    /// Appends a syscall with a precomputed id.
    pub fn emit_syscall_hash(&mut self, id: u32) -> &mut Self {
        self.emit_instruction(OpCode::SYSCALL, &id.to_le_bytes())
    }

    /// Derives the stable id of a syscall from its qualified name: the
    /// name is SHA-256 hashed once and the digest truncated to its first
    /// four bytes, read as a little-endian u32.
    pub fn hash_syscall(api: &str) -> VmResult<u32> {
        if api.len() > MAX_SYSCALL_NAME_LEN {
            return Err(VmError::invalid_operation_msg(format!(
                "syscall name of {} bytes exceeds the {MAX_SYSCALL_NAME_LEN}-byte limit",
                api.len()
            )));
        }

        let digest = Sha256::digest(api.as_bytes());
        let mut id = [0u8; 4];
        id.copy_from_slice(&digest[..4]);
        Ok(u32::from_le_bytes(id))
    }

    /// The bytes assembled so far, as an owned script.
    #[inline]
    pub fn to_array(&self) -> Vec<u8> {
        self.script.clone()
    }

    /// The length of the script assembled so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.script.len()
    }

    /// Whether nothing has been emitted yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}
