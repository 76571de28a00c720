//! # Neo Constants
//!
//! Global constants used throughout the script execution runtime.

/// Size of a script hash / account address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Size of a 256-bit hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Number of seconds between two blocks.
pub const SECONDS_PER_BLOCK: usize = 15;

/// Number of milliseconds between two blocks.
pub const MILLISECONDS_PER_BLOCK: u32 = 15000;

/// Maximum number of blocks traceable from smart contracts.
pub const MAX_TRACEABLE_BLOCKS: u32 = 2_102_400;

/// Maximum size of a contract script in bytes.
pub const MAX_SCRIPT_SIZE: usize = 1024;

/// Maximum length of serialized contract data in bytes.
pub const MAX_SCRIPT_LENGTH: usize = 65536;
