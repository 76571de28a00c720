//! Storage interfaces and the layered data cache used by executions.

pub mod data_cache;

pub use data_cache::{DataCache, MemoryStore, Store};
