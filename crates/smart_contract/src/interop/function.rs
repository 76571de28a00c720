//! The syscall registry.
//!
//! Functions bind a stable id with a handler, its price and the call
//! flags the invoking frame must hold. Registries are built once, sorted
//! by id and searched on every syscall.

use crate::interop::context::Context;
use crate::interop::names;
use crate::interop::{contract, runtime};
use crate::Result;
use neo_vm::CallFlags;

/// A syscall handler operating on the invocation context.
pub type SyscallHandler = fn(&mut Context) -> Result<()>;

/// Binds a syscall name and id with the handler and its price. Inited
/// once for all invocation contexts.
#[derive(Clone)]
pub struct Function {
    /// Stable id derived from the qualified name.
    pub id: u32,
    /// The qualified name, e.g. `System.Runtime.Notify`.
    pub name: &'static str,
    /// The handler invoked on dispatch.
    pub func: SyscallHandler,
    /// The number of parameters the handler pops.
    pub param_count: usize,
    /// Base price, multiplied by the context's execution fee factor.
    pub price: i64,
    /// The flags which must be set on the invoking frame. The default is
    /// `NONE`, i.e. no flags are required.
    pub required_flags: CallFlags,
}

impl Function {
    /// Creates a function, deriving the id from the name.
    pub fn new(
        name: &'static str,
        func: SyscallHandler,
        param_count: usize,
        price: i64,
        required_flags: CallFlags,
    ) -> Self {
        Self {
            id: names::to_id(name),
            name,
            func,
            param_count,
            price,
            required_flags,
        }
    }
}

/// Sorts a function table by id, the order lookup requires.
pub fn sort_functions(functions: &mut [Function]) {
    functions.sort_by_key(|f| f.id);
}

/// Binary-searches a sorted function table for `id`.
pub fn find_function(functions: &[Function], id: u32) -> Option<&Function> {
    functions
        .binary_search_by_key(&id, |f| f.id)
        .ok()
        .map(|index| &functions[index])
}

/// The syscall table shipped by the core, sorted by id. Prices and
/// required flags follow the C# interop service definitions.
pub fn system_interops() -> Vec<Function> {
    let mut functions = vec![
        Function::new(
            names::SYSTEM_BLOCKCHAIN_GET_HEIGHT,
            runtime::blockchain_get_height,
            0,
            1 << 4,
            CallFlags::READ_STATES,
        ),
        Function::new(
            names::SYSTEM_CONTRACT_CALL_NATIVE,
            contract::call_native,
            1,
            0,
            CallFlags::NONE,
        ),
        Function::new(
            names::SYSTEM_RUNTIME_GET_INVOCATION_COUNTER,
            runtime::get_invocation_counter,
            0,
            1 << 4,
            CallFlags::NONE,
        ),
        Function::new(
            names::SYSTEM_RUNTIME_GET_NETWORK,
            runtime::get_network,
            0,
            1 << 3,
            CallFlags::NONE,
        ),
        Function::new(
            names::SYSTEM_RUNTIME_GET_RANDOM,
            runtime::get_random,
            0,
            1 << 4,
            CallFlags::NONE,
        ),
        Function::new(
            names::SYSTEM_RUNTIME_GET_TIME,
            runtime::get_time,
            0,
            1 << 3,
            CallFlags::NONE,
        ),
        Function::new(
            names::SYSTEM_RUNTIME_GET_TRIGGER,
            runtime::get_trigger,
            0,
            1 << 3,
            CallFlags::NONE,
        ),
        Function::new(
            names::SYSTEM_RUNTIME_LOG,
            runtime::log_message,
            1,
            1 << 15,
            CallFlags::ALLOW_NOTIFY,
        ),
        Function::new(
            names::SYSTEM_RUNTIME_NOTIFY,
            runtime::notify,
            2,
            1 << 15,
            CallFlags::ALLOW_NOTIFY,
        ),
        Function::new(
            names::SYSTEM_RUNTIME_PLATFORM,
            runtime::platform,
            0,
            1 << 3,
            CallFlags::NONE,
        ),
    ];
    sort_functions(&mut functions);
    functions
}
