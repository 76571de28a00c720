//! IO operations and data structures for the Neo blockchain.
//!
//! This crate provides binary serialization with the variable-length
//! integer framing used across the Neo wire and state formats.

pub mod binary_writer;
pub mod memory_reader;
pub mod serializable;

pub use binary_writer::BinaryWriter;
pub use memory_reader::MemoryReader;
pub use serializable::Serializable;

/// Error types for IO operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("End of stream")]
    EndOfStream,
}

/// Result type for IO operations
pub type Result<T> = std::result::Result<T, Error>;
