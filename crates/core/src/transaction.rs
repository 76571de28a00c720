//! Transaction container types consumed by the script runtime.
//!
//! Only the fields the interop layer observes are modelled here: the
//! precomputed hash, the witnessing signers and the fee columns. Wire
//! serialization and verification live outside this crate.

use crate::uint160::UInt160;
use crate::uint256::UInt256;
use bitflags::bitflags;

bitflags! {
    /// Scopes a signer's witness applies to (matches C# WitnessScope
    /// exactly).
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WitnessScope: u8 {
        /// No contract was witnessed; only the transaction itself.
        const NONE = 0x00;
        /// The witness is valid only for the entry-point contract.
        const CALLED_BY_ENTRY = 0x01;
        /// The witness is valid for the custom contract list.
        const CUSTOM_CONTRACTS = 0x10;
        /// The witness is valid for the custom group list.
        const CUSTOM_GROUPS = 0x20;
        /// The witness is constrained by witness rules.
        const WITNESS_RULES = 0x40;
        /// The witness is valid everywhere.
        const GLOBAL = 0x80;
    }
}

/// A transaction signer together with its witness scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    /// The account that provides the witness.
    pub account: UInt160,
    /// The scopes the witness applies to.
    pub scopes: WitnessScope,
}

impl Signer {
    /// Creates a signer with the given account and scopes.
    pub fn new(account: UInt160, scopes: WitnessScope) -> Self {
        Self { account, scopes }
    }
}

/// The subset of a Neo transaction visible to executing scripts.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    /// The transaction hash, fixed at construction.
    hash: UInt256,
    /// A random number to avoid hash collisions.
    pub nonce: u32,
    /// The fee paid for script execution, in datoshi.
    pub system_fee: i64,
    /// The fee paid for inclusion and verification, in datoshi.
    pub network_fee: i64,
    /// The height after which the transaction is no longer valid.
    pub valid_until_block: u32,
    /// The witnessing signers, first one being the sender.
    pub signers: Vec<Signer>,
    /// The execution script.
    pub script: Vec<u8>,
}

impl Transaction {
    /// Creates a transaction with the given hash and signers.
    pub fn new(hash: UInt256, signers: Vec<Signer>) -> Self {
        Self {
            hash,
            signers,
            ..Default::default()
        }
    }

    /// The transaction hash.
    pub fn hash(&self) -> UInt256 {
        self.hash
    }

    /// The sender account, i.e. the first signer.
    pub fn sender(&self) -> Option<UInt160> {
        self.signers.first().map(|s| s.account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_is_first_signer() {
        let a = UInt160::from([1u8; 20]);
        let b = UInt160::from([2u8; 20]);
        let tx = Transaction::new(
            UInt256::zero(),
            vec![
                Signer::new(a, WitnessScope::CALLED_BY_ENTRY),
                Signer::new(b, WitnessScope::GLOBAL),
            ],
        );
        assert_eq!(tx.sender(), Some(a));
    }

    #[test]
    fn test_empty_transaction_has_no_sender() {
        assert_eq!(Transaction::default().sender(), None);
    }
}
