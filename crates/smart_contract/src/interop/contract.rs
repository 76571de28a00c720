//! Native contract descriptors and their hardfork-specific
//! materialisation.
//!
//! Every native contract is declared once at process start as a
//! [`ContractMD`]: its identity, methods with activation hardforks and
//! events. What the ledger and the VM actually consume is the
//! hardfork-specific view ([`HFSpecificContractMD`]): filtered tables, a
//! synthesized stub script wrapped in a NEF and the finalised manifest.
//! Views are built lazily, cached per hardfork key and immutable
//! afterwards; the stub bytes feed contract hashes and state dumps, so
//! they must be reproducible byte for byte.

use crate::contract_state::create_native_contract_hash;
use crate::interop::context::Context;
use crate::interop::names;
use crate::manifest::{ContractEvent, ContractManifest, ContractMethod, ContractParameterType};
use crate::nef::NefFile;
use crate::storage::DataCache;
use crate::{Error, Result};
use neo_core::{Hardfork, UInt160};
use neo_vm::{CallFlags, OpCode, ScriptBuilder, StackItem};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The compiler string stamped into synthesized native NEFs. The value is
/// stored in the contract state and affects state dumps, therefore it is
/// taken from the C# node and must never change.
pub const NATIVE_COMPILER: &str = "neo-core-v3.0";

/// A native method implementation.
pub type Method = fn(&mut Context, &[StackItem]) -> Result<StackItem>;

/// A generic hardfork-independent native contract method descriptor.
#[derive(Clone)]
pub struct MethodAndPrice {
    /// The native implementation of the method.
    pub func: Method,
    /// The ABI descriptor; its `offset` is only meaningful in the
    /// hardfork-specific copies.
    pub md: ContractMethod,
    /// Execution fee, multiplied by the base execution fee factor.
    pub cpu_fee: i64,
    /// Storage fee, multiplied by the base storage price.
    pub storage_fee: i64,
    /// Flags the calling frame must hold.
    pub required_flags: CallFlags,
    /// The hardfork the method becomes active in, if any.
    pub active_from: Option<Hardfork>,
}

impl MethodAndPrice {
    /// Creates a descriptor for an always-active method.
    pub fn new(
        func: Method,
        md: ContractMethod,
        cpu_fee: i64,
        required_flags: CallFlags,
    ) -> Self {
        Self {
            func,
            md,
            cpu_fee,
            storage_fee: 0,
            required_flags,
            active_from: None,
        }
    }

    /// Restricts the method to hardfork `hf` and later.
    pub fn active_from(mut self, hf: Hardfork) -> Self {
        self.active_from = Some(hf);
        self
    }
}

/// A hardfork-specific native contract method descriptor.
#[derive(Clone)]
pub struct HFSpecificMethodAndPrice {
    /// The native implementation of the method.
    pub func: Method,
    /// The ABI descriptor with `offset` pointing at the method's stub.
    pub md: ContractMethod,
    /// Execution fee, multiplied by the base execution fee factor.
    pub cpu_fee: i64,
    /// Storage fee, multiplied by the base storage price.
    pub storage_fee: i64,
    /// Offset of the `System.Contract.CallNative` syscall inside the
    /// stub script; unique per method and the key of method dispatch.
    pub syscall_offset: usize,
    /// Flags the calling frame must hold.
    pub required_flags: CallFlags,
}

/// A generic hardfork-independent native contract event descriptor.
#[derive(Clone)]
pub struct Event {
    /// The ABI descriptor of the event.
    pub md: ContractEvent,
    /// The hardfork the event becomes active in, if any.
    pub active_from: Option<Hardfork>,
}

/// A hardfork-specific native contract event descriptor.
#[derive(Clone)]
pub struct HFSpecificEvent {
    /// The ABI descriptor of the event.
    pub md: ContractEvent,
}

/// Callback finalizing a freshly built hardfork-specific manifest.
pub type ManifestFinalizer = Box<dyn Fn(&mut ContractManifest) + Send + Sync>;

/// The interface of all native contracts. The dispatch core only needs
/// the metadata and the lifecycle callbacks; business logic stays with
/// the implementations.
pub trait NativeContract: Send + Sync {
    /// Generic native contract metadata.
    fn metadata(&self) -> &ContractMD;

    /// Performs contract initialization on deploy or update. The active
    /// hardfork is passed as the second argument.
    fn initialize(&self, _ic: &mut Context, _hf: Option<Hardfork>) -> Result<()> {
        Ok(())
    }

    /// Initializes the contract's in-memory cache after a node restart,
    /// when the contract is already deployed but no `initialize` call
    /// will happen.
    fn initialize_cache(&self, _block_height: u32, _dao: &mut DataCache) -> Result<()> {
        Ok(())
    }

    /// Called for every persisted block before its transactions.
    fn on_persist(&self, _ic: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Called for every persisted block after its transactions.
    fn post_persist(&self, _ic: &mut Context) -> Result<()> {
        Ok(())
    }

    /// The hardfork the contract activates in, or `None` when it is
    /// always active.
    fn active_in(&self) -> Option<Hardfork> {
        None
    }
}

/// A generic hardfork-independent native contract declaration.
pub struct ContractMD {
    /// The unique id of the contract, from the negative namespace.
    pub id: i32,
    /// The script hash, derived deterministically from the name.
    pub hash: UInt160,
    /// The contract name.
    pub name: String,
    /// The method set with activation hardforks, sorted by
    /// (name ascending, parameter count descending). Any HF-dependent
    /// part of the entries (offsets in particular) must not be used;
    /// that is what the cache below is for.
    pub methods: Vec<MethodAndPrice>,
    /// The event set with activation hardforks, in declaration order.
    pub events: Vec<Event>,
    /// The hardforks the contract reacts to. Unlike the C#
    /// implementation this set does not include the contract's own
    /// activation hardfork. Populated during registration and read-only
    /// afterwards, hence not guarded by the cache lock.
    pub active_hfs: HashSet<Hardfork>,

    on_manifest_construction: Option<ManifestFinalizer>,

    /// Ready-to-use hardfork-specific descriptors, built lazily. The
    /// `None` key holds the always-active-only view.
    md_cache: RwLock<HashMap<Option<Hardfork>, Arc<HFSpecificContractMD>>>,
}

/// A hardfork-specific native contract descriptor, immutable once cached.
#[derive(Clone)]
pub struct HFSpecificContractMD {
    /// The unique id of the contract.
    pub id: i32,
    /// The script hash of the contract.
    pub hash: UInt160,
    /// The synthesized executable wrapping the stub script.
    pub nef: NefFile,
    /// The finalised manifest for this hardfork.
    pub manifest: ContractManifest,
    /// Methods active at this hardfork, offsets assigned.
    pub methods: Vec<HFSpecificMethodAndPrice>,
    /// Events active at this hardfork.
    pub events: Vec<HFSpecificEvent>,
}

impl ContractMD {
    /// Creates a declaration with the given name and id. The optional
    /// callback runs once per hardfork-specific manifest to finalize it.
    pub fn new(name: impl Into<String>, id: i32, finalizer: Option<ManifestFinalizer>) -> Self {
        let name = name.into();
        let hash = create_native_contract_hash(&name);
        Self {
            id,
            hash,
            name,
            methods: Vec::new(),
            events: Vec::new(),
            active_hfs: HashSet::new(),
            on_manifest_construction: finalizer,
            md_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a new method to the contract. Must only be called during
    /// registration, before the first materialisation.
    pub fn add_method(&mut self, mut method: MethodAndPrice) {
        method.md.safe = method
            .required_flags
            .intersection(CallFlags::ALL.difference(CallFlags::READ_ONLY))
            .is_empty();

        // Keep (name ascending, parameter count descending) so that
        // overload lookup can binary-search by name and take the first
        // arity match.
        let index = self.methods.partition_point(|m| {
            m.md.name < method.md.name
                || (m.md.name == method.md.name
                    && m.md.parameters.len() > method.md.parameters.len())
        });
        if let Some(hf) = method.active_from {
            self.active_hfs.insert(hf);
        }
        self.methods.insert(index, method);
    }

    /// Adds a new event to the contract. Event order is declaration
    /// order and determines manifest layout.
    pub fn add_event(&mut self, event: Event) {
        if let Some(hf) = event.active_from {
            self.active_hfs.insert(hf);
        }
        self.events.push(event);
    }

    /// Returns the hardfork-specific metadata, i.e. the methods, events
    /// and script active at hardfork `hf`. `None` yields the view with
    /// always-active members only. Views are cached for the lifetime of
    /// the process.
    pub fn hf_specific_contract_md(
        &self,
        hf: Option<Hardfork>,
    ) -> Result<Arc<HFSpecificContractMD>> {
        {
            let cache = self.md_cache.read();
            if let Some(md) = cache.get(&hf) {
                return Ok(Arc::clone(md));
            }
        }

        // Build without holding any lock; builds are pure functions of
        // the declaration, so a racing build yields a structurally
        // identical descriptor and the first insert wins.
        let built = Arc::new(self.build_hf_specific_md(hf)?);
        let mut cache = self.md_cache.write();
        Ok(Arc::clone(cache.entry(hf).or_insert(built)))
    }

    /// Builds the descriptor with the methods and events active starting
    /// from the specified hardfork or older.
    fn build_hf_specific_md(&self, hf: Option<Hardfork>) -> Result<HFSpecificContractMD> {
        let is_active =
            |active_from: Option<Hardfork>| match (active_from, hf) {
                (None, _) => true,
                (Some(af), Some(hf)) => af <= hf,
                (Some(_), None) => false,
            };

        let mut abi_methods = Vec::with_capacity(self.methods.len());
        let mut methods = Vec::with_capacity(self.methods.len());
        let mut builder = ScriptBuilder::new();
        for method in &self.methods {
            if !is_active(method.active_from) {
                continue;
            }

            // Copy the descriptor so the HF-based offset update never
            // touches the declaration.
            let mut md = method.md.clone();
            md.offset = builder.len();

            builder.emit_instruction(OpCode::PUSHINT8, &[0]);
            let syscall_offset = builder.len();
            builder.emit_syscall_hash(names::to_id(names::SYSTEM_CONTRACT_CALL_NATIVE));
            builder.emit_opcode(OpCode::RET);

            abi_methods.push(md.clone());
            methods.push(HFSpecificMethodAndPrice {
                func: method.func,
                md,
                cpu_fee: method.cpu_fee,
                storage_fee: method.storage_fee,
                syscall_offset,
                required_flags: method.required_flags,
            });
        }

        let mut abi_events = Vec::with_capacity(self.events.len());
        let mut events = Vec::with_capacity(self.events.len());
        for event in &self.events {
            if !is_active(event.active_from) {
                continue;
            }
            abi_events.push(event.md.clone());
            events.push(HFSpecificEvent {
                md: event.md.clone(),
            });
        }

        // The NEF is stored in the contract state and affects the state
        // dump, therefore the header values are taken from the C# node.
        let nef = NefFile::new(NATIVE_COMPILER, builder.to_array())?;

        let mut manifest = ContractManifest::default_manifest(self.name.clone());
        manifest.abi.methods = abi_methods;
        manifest.abi.events = abi_events;
        if let Some(finalizer) = &self.on_manifest_construction {
            finalizer(&mut manifest);
        }

        Ok(HFSpecificContractMD {
            id: self.id,
            hash: self.hash,
            nef,
            manifest,
            methods,
            events,
        })
    }
}

impl HFSpecificContractMD {
    /// Returns the method whose `System.Contract.CallNative` syscall
    /// sits at `offset` in the stub script. Tables are small, a linear
    /// scan is fine.
    pub fn get_method_by_offset(&self, offset: usize) -> Option<&HFSpecificMethodAndPrice> {
        self.methods.iter().find(|m| m.syscall_offset == offset)
    }

    /// Returns method `name` with the specified number of parameters. A
    /// `param_count` of -1 accepts any arity and returns the
    /// largest-arity overload.
    pub fn get_method(&self, name: &str, param_count: i32) -> Option<&HFSpecificMethodAndPrice> {
        let index = self.methods.partition_point(|m| {
            m.md.name.as_str() < name
                || (m.md.name == name
                    && param_count >= 0
                    && m.md.parameters.len() as i32 > param_count)
        });
        let method = self.methods.get(index)?;
        if method.md.name == name
            && (param_count == -1 || method.md.parameters.len() as i32 == param_count)
        {
            Some(method)
        } else {
            None
        }
    }
}

/// The implementation of `System.Contract.CallNative`. The VM lands here
/// from a native stub; the executing method is identified by the syscall
/// position inside the stub script.
pub fn call_native(ic: &mut Context) -> Result<()> {
    let version = ic.vm_mut()?.pop()?.as_i64().map_err(Error::from)?;
    if version != 0 {
        return Err(Error::NativeContract(format!(
            "native contract of version {version} is not active"
        )));
    }

    let current = ic.vm()?.current_script_hash();
    let native = ic
        .natives
        .iter()
        .find(|c| c.metadata().hash == current)
        .cloned()
        .ok_or_else(|| {
            Error::ContractNotFound(format!("{current} is not a native contract"))
        })?;

    if let Some(hf) = native.active_in() {
        if !ic.is_hardfork_enabled(hf) {
            return Err(Error::NativeContract(format!(
                "native contract {} is not active yet",
                native.metadata().name
            )));
        }
    }

    let md = native
        .metadata()
        .hf_specific_contract_md(ic.current_hardfork())?;
    let offset = ic.vm()?.instruction_pointer();
    let method = md
        .get_method_by_offset(offset)
        .cloned()
        .ok_or_else(|| Error::MethodNotFound(format!("no method at offset {offset}")))?;

    let flags = ic.vm()?.call_flags();
    if !flags.has(method.required_flags) {
        return Err(Error::MissingCallFlags {
            have: flags.bits(),
            need: method.required_flags.bits(),
        });
    }

    let price =
        method.cpu_fee * ic.base_exec_fee() + method.storage_fee * ic.base_storage_fee();
    if !ic.vm_mut()?.add_gas(price) {
        return Err(Error::InsufficientGas);
    }

    *ic.invocations.entry(md.hash).or_insert(0) += 1;

    let mut args = Vec::with_capacity(method.md.parameters.len());
    for _ in 0..method.md.parameters.len() {
        args.push(ic.vm_mut()?.pop()?);
    }
    let result = (method.func)(ic, &args)?;
    if method.md.return_type != ContractParameterType::Void {
        ic.vm_mut()?.push(result);
    }
    Ok(())
}
