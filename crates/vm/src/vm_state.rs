//! Terminal states of a script execution.

/// The state a VM run ends in, as reported back to the embedder. The
/// interop layer never recovers from a fault; a faulted script is simply
/// abandoned after its context is finalized. Discriminants match the C#
/// `VMState` flag values so the state can cross the RPC surface
/// unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VMState {
    /// The run has not started, or is still in progress.
    #[default]
    None = 0,
    /// The script ran to completion and its results are valid.
    Halt = 1 << 0,
    /// The script was aborted by an unhandled error or an explicit
    /// ABORT.
    Fault = 1 << 1,
    /// A debugger paused the run at a breakpoint.
    Break = 1 << 2,
}

impl VMState {
    /// Whether the run completed successfully.
    pub fn is_halt(self) -> bool {
        self == VMState::Halt
    }

    /// Whether the run was aborted.
    pub fn is_fault(self) -> bool {
        self == VMState::Fault
    }
}
