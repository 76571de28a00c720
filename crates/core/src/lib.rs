//! Core primitive types for the Neo script execution runtime.
//!
//! This crate provides the hash types, hardfork configuration, protocol
//! settings and container types (transactions, blocks) shared by the
//! interop and smart-contract layers.

pub mod block;
pub mod constants;
pub mod crypto_utils;
pub mod hardfork;
pub mod protocol_settings;
pub mod transaction;
pub mod uint160;
pub mod uint256;

pub use block::Block;
pub use hardfork::Hardfork;
pub use protocol_settings::ProtocolSettings;
pub use transaction::{Signer, Transaction, WitnessScope};
pub use uint160::UInt160;
pub use uint256::UInt256;

use thiserror::Error;

/// Core module errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid format error with detailed description
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Error message describing the format issue
        message: String,
    },

    /// Invalid data error with context
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the data issue
        message: String,
    },

    /// Invalid operation attempted
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Error message describing the invalid operation
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid-format error from anything printable.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        CoreError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid-data error from anything printable.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        CoreError::InvalidData {
            message: message.into(),
        }
    }
}

/// Result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
