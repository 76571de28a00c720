//! Neo interop and native-contract dispatch core.
//!
//! This crate mediates between the stack-based VM executing contract
//! bytecode and the surrounding ledger subsystem. It builds and caches
//! the per-hardfork descriptors of the built-in (native) contracts,
//! resolves and prices every syscall on the VM hot path, and exposes the
//! per-execution invocation context with its "persisting block" view of
//! the ledger.

pub use neo_core::{Block, Hardfork, ProtocolSettings, Signer, Transaction, UInt160, UInt256};
pub use neo_vm::{CallFlags, StackItem, TriggerType, VMState};

pub mod contract_state;
pub mod interop;
pub mod manifest;
pub mod nef;
pub mod storage;

use thiserror::Error;

/// Smart contract error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("syscall not found: {0:#010x}")]
    SyscallNotFound(u32),
    #[error("missing call flags: {have:05b} vs {need:05b}")]
    MissingCallFlags { have: u8, need: u8 },
    #[error("insufficient amount of gas")]
    InsufficientGas,
    #[error("key not found")]
    KeyNotFound,
    #[error("contract not found: {0}")]
    ContractNotFound(String),
    #[error("method not found: {0}")]
    MethodNotFound(String),
    #[error("native contract error: {0}")]
    NativeContract(String),
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("VM error: {0}")]
    Vm(#[from] neo_vm::VmError),
    #[error("core error: {0}")]
    Core(#[from] neo_core::CoreError),
    #[error("serialization error: {0}")]
    Serialization(#[from] neo_io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates an invalid-operation error from anything printable.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation(message.into())
    }
}

/// Result type for smart contract operations
pub type Result<T> = std::result::Result<T, Error>;
