//! OpCode definitions for the Neo Virtual Machine.
//!
//! Byte values mirror `Neo.VM/OpCode.cs` from the C# reference
//! implementation; only the instructions reachable from the script
//! runtime are listed.

use crate::error::{VmError, VmResult};

/// The instructions supported by the script runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Pushes a 1-byte signed integer onto the stack.
    PUSHINT8 = 0x00,
    /// Pushes a 2-byte signed integer onto the stack.
    PUSHINT16 = 0x01,
    /// Pushes a 4-byte signed integer onto the stack.
    PUSHINT32 = 0x02,
    /// Pushes an 8-byte signed integer onto the stack.
    PUSHINT64 = 0x03,
    /// Pushes a 16-byte signed integer onto the stack.
    PUSHINT128 = 0x04,
    /// Pushes a 32-byte signed integer onto the stack.
    PUSHINT256 = 0x05,
    /// Pushes the boolean value `true` onto the stack.
    PUSHT = 0x08,
    /// Pushes the boolean value `false` onto the stack.
    PUSHF = 0x09,
    /// Pushes `null` onto the stack.
    PUSHNULL = 0x0B,
    /// Pushes data of up to 255 bytes, 1-byte length prefix.
    PUSHDATA1 = 0x0C,
    /// Pushes data of up to 65535 bytes, 2-byte length prefix.
    PUSHDATA2 = 0x0D,
    /// Pushes data of up to 4 GiB, 4-byte length prefix.
    PUSHDATA4 = 0x0E,
    /// Pushes the integer -1 onto the stack.
    PUSHM1 = 0x0F,
    /// Pushes the integer 0 onto the stack.
    PUSH0 = 0x10,
    /// Pushes the integer 1 onto the stack.
    PUSH1 = 0x11,
    /// Pushes the integer 2 onto the stack.
    PUSH2 = 0x12,
    /// Pushes the integer 3 onto the stack.
    PUSH3 = 0x13,
    /// Pushes the integer 4 onto the stack.
    PUSH4 = 0x14,
    /// Pushes the integer 5 onto the stack.
    PUSH5 = 0x15,
    /// Pushes the integer 6 onto the stack.
    PUSH6 = 0x16,
    /// Pushes the integer 7 onto the stack.
    PUSH7 = 0x17,
    /// Pushes the integer 8 onto the stack.
    PUSH8 = 0x18,
    /// Pushes the integer 9 onto the stack.
    PUSH9 = 0x19,
    /// Pushes the integer 10 onto the stack.
    PUSH10 = 0x1A,
    /// Pushes the integer 11 onto the stack.
    PUSH11 = 0x1B,
    /// Pushes the integer 12 onto the stack.
    PUSH12 = 0x1C,
    /// Pushes the integer 13 onto the stack.
    PUSH13 = 0x1D,
    /// Pushes the integer 14 onto the stack.
    PUSH14 = 0x1E,
    /// Pushes the integer 15 onto the stack.
    PUSH15 = 0x1F,
    /// Pushes the integer 16 onto the stack.
    PUSH16 = 0x20,
    /// Does nothing.
    NOP = 0x21,
    /// Aborts execution unconditionally; cannot be caught.
    ABORT = 0x38,
    /// Returns from the current context.
    RET = 0x40,
    /// Calls a host function identified by a 4-byte id.
    SYSCALL = 0x41,
}

impl OpCode {
    /// The number of operand bytes following the opcode, or `None` for the
    /// variable-length push-data forms.
    pub fn operand_size(self) -> Option<usize> {
        match self {
            OpCode::PUSHINT8 => Some(1),
            OpCode::PUSHINT16 => Some(2),
            OpCode::PUSHINT32 => Some(4),
            OpCode::PUSHINT64 => Some(8),
            OpCode::PUSHINT128 => Some(16),
            OpCode::PUSHINT256 => Some(32),
            OpCode::PUSHDATA1 | OpCode::PUSHDATA2 | OpCode::PUSHDATA4 => None,
            OpCode::SYSCALL => Some(4),
            _ => Some(0),
        }
    }

    /// The base execution price of the instruction in datoshi, before the
    /// execution fee factor is applied (matches the C# fee table).
    pub fn price(self) -> i64 {
        match self {
            OpCode::PUSHINT8
            | OpCode::PUSHINT16
            | OpCode::PUSHINT32
            | OpCode::PUSHINT64 => 1 << 0,
            OpCode::PUSHINT128 | OpCode::PUSHINT256 => 1 << 2,
            OpCode::PUSHT | OpCode::PUSHF => 1 << 0,
            OpCode::PUSHNULL => 1 << 0,
            OpCode::PUSHDATA1 => 1 << 3,
            OpCode::PUSHDATA2 => 1 << 9,
            OpCode::PUSHDATA4 => 1 << 12,
            OpCode::NOP => 1 << 0,
            OpCode::ABORT => 0,
            OpCode::RET => 0,
            OpCode::SYSCALL => 0,
            // PUSHM1 through PUSH16 and anything else constant-sized.
            _ => 1 << 0,
        }
    }

    /// Decodes an opcode from its byte value.
    pub fn from_u8(value: u8) -> VmResult<Self> {
        let op = match value {
            0x00 => OpCode::PUSHINT8,
            0x01 => OpCode::PUSHINT16,
            0x02 => OpCode::PUSHINT32,
            0x03 => OpCode::PUSHINT64,
            0x04 => OpCode::PUSHINT128,
            0x05 => OpCode::PUSHINT256,
            0x08 => OpCode::PUSHT,
            0x09 => OpCode::PUSHF,
            0x0B => OpCode::PUSHNULL,
            0x0C => OpCode::PUSHDATA1,
            0x0D => OpCode::PUSHDATA2,
            0x0E => OpCode::PUSHDATA4,
            0x0F => OpCode::PUSHM1,
            0x10 => OpCode::PUSH0,
            0x11 => OpCode::PUSH1,
            0x12 => OpCode::PUSH2,
            0x13 => OpCode::PUSH3,
            0x14 => OpCode::PUSH4,
            0x15 => OpCode::PUSH5,
            0x16 => OpCode::PUSH6,
            0x17 => OpCode::PUSH7,
            0x18 => OpCode::PUSH8,
            0x19 => OpCode::PUSH9,
            0x1A => OpCode::PUSH10,
            0x1B => OpCode::PUSH11,
            0x1C => OpCode::PUSH12,
            0x1D => OpCode::PUSH13,
            0x1E => OpCode::PUSH14,
            0x1F => OpCode::PUSH15,
            0x20 => OpCode::PUSH16,
            0x21 => OpCode::NOP,
            0x38 => OpCode::ABORT,
            0x40 => OpCode::RET,
            0x41 => OpCode::SYSCALL,
            _ => return Err(VmError::InvalidOpCode { opcode: value }),
        };
        Ok(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_values_match_reference() {
        assert_eq!(OpCode::PUSHINT8 as u8, 0x00);
        assert_eq!(OpCode::PUSHDATA1 as u8, 0x0C);
        assert_eq!(OpCode::PUSH0 as u8, 0x10);
        assert_eq!(OpCode::ABORT as u8, 0x38);
        assert_eq!(OpCode::RET as u8, 0x40);
        assert_eq!(OpCode::SYSCALL as u8, 0x41);
    }

    #[test]
    fn test_from_u8_round_trip() {
        for byte in [0x00u8, 0x05, 0x0C, 0x0F, 0x10, 0x20, 0x38, 0x40, 0x41] {
            assert_eq!(OpCode::from_u8(byte).unwrap() as u8, byte);
        }
        assert!(OpCode::from_u8(0xFE).is_err());
    }

    #[test]
    fn test_operand_sizes() {
        assert_eq!(OpCode::PUSHINT8.operand_size(), Some(1));
        assert_eq!(OpCode::SYSCALL.operand_size(), Some(4));
        assert_eq!(OpCode::RET.operand_size(), Some(0));
        assert_eq!(OpCode::PUSHDATA1.operand_size(), None);
    }
}
