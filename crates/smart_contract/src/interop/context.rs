//! The per-execution invocation context.
//!
//! One context is created for every script run. It owns the private
//! storage overlay, the notification log, the invocation counters and
//! the VM engine for the duration of the execution, and it adjusts every
//! ledger query for the "persisting block" semantics: the block being
//! applied is visible to its scripts but not yet stored.

use crate::contract_state::{ContractState, NotificationEvent, ScriptContainer};
use crate::interop::contract::NativeContract;
use crate::interop::engine::ExecutionEngine;
use crate::interop::function::{self, Function};
use crate::storage::DataCache;
use crate::{Error, Result};
use neo_core::{Block, Hardfork, ProtocolSettings, Signer, Transaction, UInt160, UInt256};
use neo_vm::{OpCode, StackItem, TriggerType, VMState};
use std::collections::HashMap;
use std::sync::Arc;

/// The default multiplier for opcode and syscall prices. Consensus
/// visible; must not become configurable at runtime.
pub const DEFAULT_BASE_EXEC_FEE: i64 = 30;

/// The interface to the blockchain required for context functionality.
pub trait Ledger: Send + Sync {
    /// The height of the latest persisted and stored block.
    fn block_height(&self) -> u32;

    /// The hash of the latest persisted and stored block.
    fn current_block_hash(&self) -> UInt256;

    /// Looks a block up by hash; `Error::KeyNotFound` when missing.
    fn get_block(&self, hash: &UInt256) -> Result<Arc<Block>>;

    /// The header hash at the given height.
    fn get_header_hash(&self, index: u32) -> UInt256;

    /// The protocol configuration of the chain.
    fn config(&self) -> &ProtocolSettings;
}

/// Looks a deployed contract up in the given storage view.
pub type ContractGetter = fn(&DataCache, &UInt160) -> Result<ContractState>;

/// Loads a method token into the VM on behalf of the context.
pub type TokenLoader = fn(&mut Context, i32) -> Result<()>;

/// A teardown hook run by [`Context::finalize`].
pub type CancelFunc = Box<dyn FnOnce()>;

/// The context in which interops are executed.
pub struct Context {
    /// The chain the execution happens against.
    pub chain: Arc<dyn Ledger>,
    /// The hashable container being executed, typically the transaction.
    pub container: Option<ScriptContainer>,
    /// The network magic, copied from the chain config.
    pub network: u32,
    /// Hardfork activation heights, copied from the chain config.
    pub hardforks: HashMap<Hardfork, u32>,
    /// The native contracts known to the chain.
    pub natives: Vec<Arc<dyn NativeContract>>,
    /// The reason the script is being executed.
    pub trigger: TriggerType,
    /// The block being persisted, if any.
    pub block: Option<Arc<Block>>,
    /// The transaction being executed, if any.
    pub tx: Option<Arc<Transaction>>,
    /// Seed for `System.Runtime.GetRandom`, see
    /// [`Context::init_nonce_data`].
    pub nonce_data: [u8; 16],
    /// The private storage overlay of this execution.
    pub dao: DataCache,
    /// Notifications emitted so far, in emission order.
    pub notifications: Vec<NotificationEvent>,
    /// The sorted syscall table used by dispatch.
    pub functions: Vec<Function>,
    /// Per-contract invocation counters; entries never decrease within a
    /// context.
    pub invocations: HashMap<UInt160, usize>,
    /// Running counter mixed into `GetRandom` results.
    pub get_random_counter: u32,

    vm: Option<Box<dyn ExecutionEngine>>,
    cancel_funcs: Vec<CancelFunc>,
    get_contract: ContractGetter,
    base_exec_fee: i64,
    base_storage_fee: i64,
    load_token: Option<TokenLoader>,
    signers: Option<Vec<Signer>>,
}

impl Context {
    /// Creates a new interop context. A fresh private overlay is taken
    /// from `dao`; writes stay isolated until the embedder merges them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trigger: TriggerType,
        chain: Arc<dyn Ledger>,
        dao: &DataCache,
        base_exec_fee: i64,
        base_storage_fee: i64,
        get_contract: ContractGetter,
        natives: Vec<Arc<dyn NativeContract>>,
        load_token: Option<TokenLoader>,
        block: Option<Arc<Block>>,
        tx: Option<Arc<Transaction>>,
    ) -> Self {
        let dao = dao.get_private();
        let config = chain.config();
        let network = config.network;
        let hardforks = config.hardforks.clone();
        let container = match (&tx, &block) {
            (Some(tx), _) => Some(ScriptContainer::Transaction(Arc::clone(tx))),
            (None, Some(block)) => Some(ScriptContainer::Block(Arc::clone(block))),
            (None, None) => None,
        };
        Self {
            chain,
            container,
            network,
            hardforks,
            natives,
            trigger,
            block,
            tx,
            nonce_data: [0u8; 16],
            dao,
            notifications: Vec::new(),
            functions: function::system_interops(),
            invocations: HashMap::new(),
            get_random_counter: 0,
            vm: None,
            cancel_funcs: Vec::new(),
            get_contract,
            base_exec_fee,
            base_storage_fee,
            load_token,
            signers: None,
        }
    }

    /// Initializes the nonce used in `GetRandom` calculations: the
    /// big-endian container hash if the container is a transaction,
    /// XOR-ed with the block nonce in the low eight bytes when a block
    /// is attached.
    pub fn init_nonce_data(&mut self) {
        if let Some(ScriptContainer::Transaction(tx)) = &self.container {
            self.nonce_data
                .copy_from_slice(&tx.hash().to_be_bytes()[..16]);
        }
        if let Some(block) = &self.block {
            let mut low = [0u8; 8];
            low.copy_from_slice(&self.nonce_data[..8]);
            let nonce = block.nonce ^ u64::from_le_bytes(low);
            self.nonce_data[..8].copy_from_slice(&nonce.to_le_bytes());
        }
    }

    /// Overrides the signers witnessing the current execution.
    pub fn use_signers(&mut self, signers: Vec<Signer>) {
        self.signers = Some(signers);
    }

    /// The signers witnessing the current execution: the override if
    /// set, else the transaction's signers, else nothing.
    pub fn signers(&self) -> &[Signer] {
        if let Some(signers) = &self.signers {
            return signers;
        }
        if let Some(tx) = &self.tx {
            return &tx.signers;
        }
        &[]
    }

    /// Looks a deployed contract up in the context's storage view.
    pub fn get_contract(&self, hash: &UInt160) -> Result<ContractState> {
        (self.get_contract)(&self.dao, hash)
    }

    /// Returns the metadata for the syscall with the given id.
    pub fn get_function(&self, id: u32) -> Option<&Function> {
        function::find_function(&self.functions, id)
    }

    /// The factor syscall and opcode prices are multiplied with.
    pub fn base_exec_fee(&self) -> i64 {
        self.base_exec_fee
    }

    /// The price of storing one byte in contract storage.
    pub fn base_storage_fee(&self) -> i64 {
        self.base_storage_fee
    }

    /// The price of a single opcode under this context's fee factor, the
    /// VM's price getter.
    pub fn get_price(&self, opcode: OpCode) -> i64 {
        opcode.price() * self.base_exec_fee
    }

    /// Loads a method token through the externally provided loader.
    pub fn load_token(&mut self, id: i32) -> Result<()> {
        match self.load_token {
            Some(loader) => loader(self, id),
            None => Err(Error::invalid_operation(
                "method tokens are not supported in this context",
            )),
        }
    }

    /// The engine attached to this context.
    pub fn vm(&self) -> Result<&dyn ExecutionEngine> {
        self.vm
            .as_deref()
            .ok_or_else(|| Error::invalid_operation("no VM attached to the context"))
    }

    /// The engine attached to this context, mutably.
    pub fn vm_mut(&mut self) -> Result<&mut (dyn ExecutionEngine + '_)> {
        match self.vm.as_mut() {
            Some(vm) => Ok(vm.as_mut()),
            None => Err(Error::invalid_operation("no VM attached to the context")),
        }
    }

    /// Attaches a freshly created engine to the context and lifts its
    /// gas limit; capping the budget is the embedder's responsibility.
    pub fn spawn_vm(&mut self, mut engine: Box<dyn ExecutionEngine>) {
        engine.set_gas_limit(-1);
        self.vm = Some(engine);
    }

    /// Resets the given engine and attaches it to the context for reuse.
    pub fn reuse_vm(&mut self, mut engine: Box<dyn ExecutionEngine>) {
        engine.reset(self.trigger);
        engine.set_gas_limit(-1);
        self.vm = Some(engine);
    }

    /// Handles the syscall with the given id: resolve, check the frame's
    /// call flags, charge gas, invoke. Gas is charged before the handler
    /// runs so out-of-gas looks the same whether or not the handler
    /// would have succeeded.
    pub fn syscall_handler(&mut self, id: u32) -> Result<()> {
        let (handler, price, required) = {
            let function = self.get_function(id).ok_or(Error::SyscallNotFound(id))?;
            (function.func, function.price, function.required_flags)
        };
        let flags = self.vm()?.call_flags();
        if !flags.has(required) {
            return Err(Error::MissingCallFlags {
                have: flags.bits(),
                need: required.bits(),
            });
        }
        let amount = price * self.base_exec_fee;
        if !self.vm_mut()?.add_gas(amount) {
            return Err(Error::InsufficientGas);
        }
        handler(self)
    }

    /// Queues a hook to run after the VM finishes script execution.
    pub fn register_cancel_fn(&mut self, f: Option<CancelFunc>) {
        if let Some(f) = f {
            self.cancel_funcs.push(f);
        }
    }

    /// Calls all registered cancel functions, in registration order, to
    /// release the occupied resources. Idempotent.
    pub fn finalize(&mut self) {
        for f in self.cancel_funcs.drain(..) {
            f();
        }
    }

    /// Executes the loaded VM script and calls the registered finalizers
    /// to release the occupied resources.
    pub fn exec(&mut self) -> Result<VMState> {
        let result = match self.vm_mut() {
            Ok(vm) => vm.run(),
            Err(e) => Err(e),
        };
        self.finalize();
        result
    }

    /// The latest persisted and stored block height. If the context's
    /// block is set, calculations rely on the persisting block index:
    /// the persisting block is not yet stored.
    pub fn block_height(&self) -> u32 {
        match &self.block {
            // Wraps at genesis, like the reference implementation.
            Some(block) => block.index.wrapping_sub(1),
            None => self.chain.block_height(),
        }
    }

    /// The current block hash, shifted the same way as
    /// [`Context::block_height`] when a persisting block is attached.
    pub fn current_block_hash(&self) -> UInt256 {
        match &self.block {
            Some(block) => self.chain.get_header_hash(block.index.wrapping_sub(1)),
            None => self.chain.current_block_hash(),
        }
    }

    /// Returns the block if it exists and is reachable at the current
    /// context height; the persisting block itself is not.
    pub fn get_block(&self, hash: &UInt256) -> Result<Arc<Block>> {
        let block = self.chain.get_block(hash)?;
        if block.index > self.block_height() {
            return Err(Error::KeyNotFound);
        }
        Ok(block)
    }

    /// Tells whether the specified hardfork is enabled at the current
    /// context height; the persisting block counts.
    pub fn is_hardfork_enabled(&self, hf: Hardfork) -> bool {
        match self.hardforks.get(&hf) {
            Some(&height) => self.block_height().wrapping_add(1) >= height,
            // Rely on proper hardfork initialisation made by the chain.
            None => false,
        }
    }

    /// Denotes whether the attached block's height is exactly the height
    /// of the specified hardfork activation.
    pub fn is_hardfork_activation(&self, hf: Hardfork) -> bool {
        match (&self.block, self.hardforks.get(&hf)) {
            (Some(block), Some(&height)) => block.index == height,
            _ => false,
        }
    }

    /// The latest hardfork enabled at the current context height, the
    /// key native descriptors are materialised with.
    pub fn current_hardfork(&self) -> Option<Hardfork> {
        Hardfork::ALL
            .into_iter()
            .rev()
            .find(|&hf| self.is_hardfork_enabled(hf))
    }

    /// Creates a notification event and appends it to the notification
    /// list. Never fails; order is emission order.
    pub fn add_notification(&mut self, script_hash: UInt160, name: String, item: StackItem) {
        self.notifications.push(NotificationEvent {
            script_hash,
            name,
            item,
        });
    }
}
