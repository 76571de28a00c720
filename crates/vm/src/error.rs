//! Error types for the Neo VM crate.

use thiserror::Error;

/// VM execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Invalid opcode
    #[error("Invalid opcode: {opcode:#04x}")]
    InvalidOpCode { opcode: u8 },

    /// Invalid operation with context
    #[error("Invalid operation: {reason}")]
    InvalidOperation { reason: String },

    /// Stack underflow
    #[error("Stack underflow: attempted to access {requested} items, but only {available} available")]
    StackUnderflow { requested: usize, available: usize },

    /// Invalid type conversion
    #[error("Invalid type conversion: cannot convert {from} to {to}")]
    InvalidType { from: String, to: String },

    /// Execution halted
    #[error("Execution halted: {reason}")]
    ExecutionHalted { reason: String },
}

impl VmError {
    /// Creates an invalid-operation error from anything printable.
    pub fn invalid_operation_msg(reason: impl Into<String>) -> Self {
        VmError::InvalidOperation {
            reason: reason.into(),
        }
    }
}

/// Result type for VM operations
pub type VmResult<T> = std::result::Result<T, VmError>;
