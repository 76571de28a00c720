//! The interop layer: syscall registry, native contract descriptors and
//! the per-execution invocation context.

pub mod context;
pub mod contract;
pub mod engine;
pub mod function;
pub mod names;
pub mod runtime;

pub use context::{
    CancelFunc, Context, ContractGetter, Ledger, TokenLoader, DEFAULT_BASE_EXEC_FEE,
};
pub use contract::{
    ContractMD, Event, HFSpecificContractMD, HFSpecificEvent, HFSpecificMethodAndPrice,
    Method, MethodAndPrice, NativeContract, NATIVE_COMPILER,
};
pub use engine::ExecutionEngine;
pub use function::{sort_functions, system_interops, Function, SyscallHandler};
