//! Deployed contract state and contract hash derivation.

use crate::manifest::ContractManifest;
use crate::nef::NefFile;
use neo_core::crypto_utils::hash160;
use neo_core::{UInt160, UInt256};
use neo_vm::{OpCode, ScriptBuilder, StackItem};

/// The state of a deployed contract as stored by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractState {
    /// The unique id of the contract; native contracts use negative ids.
    pub id: i32,
    /// Incremented on every contract update.
    pub update_counter: u16,
    /// The script hash identifying the contract.
    pub hash: UInt160,
    /// The executable envelope.
    pub nef: NefFile,
    /// The ABI-level descriptor.
    pub manifest: ContractManifest,
}

impl ContractState {
    /// Creates a fresh contract state with a zero update counter.
    pub fn new(id: i32, hash: UInt160, nef: NefFile, manifest: ContractManifest) -> Self {
        Self {
            id,
            update_counter: 0,
            hash,
            nef,
            manifest,
        }
    }
}

/// A notification emitted by a contract during execution. Order within a
/// context is emission order and is never rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    /// The contract that emitted the notification.
    pub script_hash: UInt160,
    /// The event name.
    pub name: String,
    /// The notification payload.
    pub item: StackItem,
}

/// Computes the deterministic hash of a contract deployed by `sender`
/// (matches C# Helper.GetContractHash exactly). The preimage is a short
/// script so that the hash lives in the same domain as verification
/// scripts: `ABORT`, push sender, push NEF checksum, push name.
pub fn create_contract_hash(sender: &UInt160, checksum: u32, name: &str) -> UInt160 {
    let mut builder = ScriptBuilder::new();
    builder.emit_opcode(OpCode::ABORT);
    builder.emit_push(sender.as_bytes());
    builder.emit_push_int(i64::from(checksum));
    builder.emit_push_string(name);
    UInt160::from(hash160(&builder.to_array()))
}

/// Computes the hash of a native contract: the zero sender and a zero
/// checksum, leaving the name as the only variable input.
pub fn create_native_contract_hash(name: &str) -> UInt160 {
    create_contract_hash(&UInt160::zero(), 0, name)
}

/// Anything executable that carries a hash: the transaction or block the
/// script originates from.
#[derive(Debug, Clone)]
pub enum ScriptContainer {
    /// A transaction being executed or verified.
    Transaction(std::sync::Arc<neo_core::Transaction>),
    /// A block being persisted.
    Block(std::sync::Arc<neo_core::Block>),
}

impl ScriptContainer {
    /// The hash of the underlying container.
    pub fn hash(&self) -> UInt256 {
        match self {
            ScriptContainer::Transaction(tx) => tx.hash(),
            ScriptContainer::Block(block) => block.hash(),
        }
    }
}
