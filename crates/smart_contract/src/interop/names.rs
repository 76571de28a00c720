//! Qualified syscall names and their stable 32-bit identifiers.
//!
//! Scripts reference syscalls by id, so the mapping below is part of the
//! wire contract.

use neo_core::crypto_utils::sha256;

pub const SYSTEM_BLOCKCHAIN_GET_HEIGHT: &str = "System.Blockchain.GetHeight";
pub const SYSTEM_CONTRACT_CALL_NATIVE: &str = "System.Contract.CallNative";
pub const SYSTEM_RUNTIME_GET_INVOCATION_COUNTER: &str = "System.Runtime.GetInvocationCounter";
pub const SYSTEM_RUNTIME_GET_NETWORK: &str = "System.Runtime.GetNetwork";
pub const SYSTEM_RUNTIME_GET_RANDOM: &str = "System.Runtime.GetRandom";
pub const SYSTEM_RUNTIME_GET_TIME: &str = "System.Runtime.GetTime";
pub const SYSTEM_RUNTIME_GET_TRIGGER: &str = "System.Runtime.GetTrigger";
pub const SYSTEM_RUNTIME_LOG: &str = "System.Runtime.Log";
pub const SYSTEM_RUNTIME_NOTIFY: &str = "System.Runtime.Notify";
pub const SYSTEM_RUNTIME_PLATFORM: &str = "System.Runtime.Platform";

/// Converts a qualified syscall name to its stable id: the first four
/// bytes of the SHA-256 of the name, read as a little-endian u32.
pub fn to_id(name: &str) -> u32 {
    let digest = sha256(name.as_bytes());
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}
