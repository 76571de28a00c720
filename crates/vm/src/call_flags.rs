//! Call-flag permissions.
//!
//! Every execution frame carries a set of capability bits that gates the
//! syscalls it may invoke: a syscall (or native method) declares the
//! flags it requires, and dispatch rejects the call unless the frame
//! holds all of them. The five-bit encoding is consensus visible and is
//! printed in binary in dispatch diagnostics.

use bitflags::bitflags;

bitflags! {
    /// Capability bits granted to an execution frame.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CallFlags: u8 {
        /// No capability at all.
        const NONE = 0;
        /// May read chain and contract state.
        const READ_STATES = 1 << 0;
        /// May modify contract state.
        const WRITE_STATES = 1 << 1;
        /// May call into other contracts.
        const ALLOW_CALL = 1 << 2;
        /// May emit notifications.
        const ALLOW_NOTIFY = 1 << 3;

        /// Full state access, reading and writing.
        const STATES = Self::READ_STATES.bits() | Self::WRITE_STATES.bits();
        /// The capabilities a *safe* method may require: reading and
        /// calling, but nothing that mutates observable state.
        const READ_ONLY = Self::READ_STATES.bits() | Self::ALLOW_CALL.bits();
        /// Every capability there is.
        const ALL = Self::STATES.bits() | Self::ALLOW_CALL.bits() | Self::ALLOW_NOTIFY.bits();
    }
}

impl CallFlags {
    /// Checks that every flag in `required` is present.
    pub fn has(self, required: CallFlags) -> bool {
        self.contains(required)
    }
}
