//! Shared test doubles for the interop integration tests.

use neo_core::{Block, ProtocolSettings, UInt160, UInt256};
use neo_smart_contract::contract_state::ContractState;
use neo_smart_contract::interop::{ExecutionEngine, Ledger};
use neo_smart_contract::storage::DataCache;
use neo_smart_contract::{Error, Result};
use neo_vm::{CallFlags, StackItem, TriggerType, VMState, VmError};
use std::collections::HashMap;
use std::sync::Arc;

/// A ledger stub backed by in-memory maps.
#[derive(Default)]
pub struct TestLedger {
    pub height: u32,
    pub tip_hash: UInt256,
    pub blocks: HashMap<UInt256, Arc<Block>>,
    pub header_hashes: HashMap<u32, UInt256>,
    pub settings: ProtocolSettings,
}

impl TestLedger {
    pub fn with_settings(settings: ProtocolSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn add_block(&mut self, block: Arc<Block>) {
        self.header_hashes.insert(block.index, block.hash());
        self.blocks.insert(block.hash(), block);
    }
}

impl Ledger for TestLedger {
    fn block_height(&self) -> u32 {
        self.height
    }

    fn current_block_hash(&self) -> UInt256 {
        self.tip_hash
    }

    fn get_block(&self, hash: &UInt256) -> Result<Arc<Block>> {
        self.blocks.get(hash).cloned().ok_or(Error::KeyNotFound)
    }

    fn get_header_hash(&self, index: u32) -> UInt256 {
        self.header_hashes.get(&index).copied().unwrap_or_default()
    }

    fn config(&self) -> &ProtocolSettings {
        &self.settings
    }
}

/// An engine stub with a scriptable frame: fixed flags, script hash and
/// instruction pointer, a real evaluation stack and gas accounting.
pub struct TestEngine {
    pub trigger: TriggerType,
    pub flags: CallFlags,
    pub script_hash: UInt160,
    pub ip: usize,
    pub gas_limit: i64,
    pub gas_consumed: i64,
    pub stack: Vec<StackItem>,
}

impl TestEngine {
    pub fn new(trigger: TriggerType, flags: CallFlags) -> Self {
        Self {
            trigger,
            flags,
            script_hash: UInt160::zero(),
            ip: 0,
            gas_limit: -1,
            gas_consumed: 0,
            stack: Vec::new(),
        }
    }
}

impl ExecutionEngine for TestEngine {
    fn trigger(&self) -> TriggerType {
        self.trigger
    }

    fn reset(&mut self, trigger: TriggerType) {
        self.trigger = trigger;
        self.stack.clear();
        self.gas_consumed = 0;
    }

    fn call_flags(&self) -> CallFlags {
        self.flags
    }

    fn current_script_hash(&self) -> UInt160 {
        self.script_hash
    }

    fn instruction_pointer(&self) -> usize {
        self.ip
    }

    fn gas_limit(&self) -> i64 {
        self.gas_limit
    }

    fn gas_consumed(&self) -> i64 {
        self.gas_consumed
    }

    fn set_gas_limit(&mut self, limit: i64) {
        self.gas_limit = limit;
    }

    fn add_gas(&mut self, amount: i64) -> bool {
        self.gas_consumed += amount;
        !(self.gas_limit >= 0 && self.gas_consumed > self.gas_limit)
    }

    fn push(&mut self, item: StackItem) {
        self.stack.push(item);
    }

    fn pop(&mut self) -> Result<StackItem> {
        self.stack.pop().ok_or_else(|| {
            Error::Vm(VmError::StackUnderflow {
                requested: 1,
                available: 0,
            })
        })
    }

    fn run(&mut self) -> Result<VMState> {
        Ok(VMState::Halt)
    }
}

/// Contract lookup used where no deployed contracts are expected.
pub fn no_contracts(_dao: &DataCache, hash: &UInt160) -> Result<ContractState> {
    Err(Error::ContractNotFound(hash.to_string()))
}
