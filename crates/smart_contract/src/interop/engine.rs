//! The seam between the invocation context and the VM interpreter.

use crate::Result;
use neo_core::UInt160;
use neo_vm::{CallFlags, StackItem, TriggerType, VMState};

/// The capabilities the interop layer requires from the VM executing the
/// script. The interpreter itself lives outside this crate; it drives
/// syscalls by calling back into [`crate::interop::Context`] with this
/// interface supplying frame state, gas accounting and stack access.
pub trait ExecutionEngine {
    /// The trigger the engine was started with.
    fn trigger(&self) -> TriggerType;

    /// Clears all engine state so it can be reused for another execution
    /// with the given trigger.
    fn reset(&mut self, trigger: TriggerType);

    /// The call flags of the current execution frame.
    fn call_flags(&self) -> CallFlags;

    /// The script hash of the current execution frame.
    fn current_script_hash(&self) -> UInt160;

    /// The position of the instruction currently being executed within
    /// the loaded script.
    fn instruction_pointer(&self) -> usize;

    /// The configured gas limit; a negative limit means unbounded.
    fn gas_limit(&self) -> i64;

    /// The amount of gas charged so far.
    fn gas_consumed(&self) -> i64;

    /// Sets the gas limit.
    fn set_gas_limit(&mut self, limit: i64);

    /// Charges `amount` of gas. Returns `false` when the remaining
    /// budget is insufficient, leaving the consumed counter capped.
    fn add_gas(&mut self, amount: i64) -> bool;

    /// Pushes an item onto the evaluation stack of the current frame.
    fn push(&mut self, item: StackItem);

    /// Pops an item from the evaluation stack of the current frame.
    fn pop(&mut self) -> Result<StackItem>;

    /// Runs the loaded script to completion.
    fn run(&mut self) -> Result<VMState>;
}
