//! Contract permission declarations.

use neo_core::UInt160;
use serde::{Deserialize, Serialize};

/// Identifies the contracts a permission applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractPermissionDescriptor {
    /// The permission applies to any contract.
    #[default]
    #[serde(rename = "*")]
    Wildcard,
    /// The permission applies to the contract with the given hash.
    Hash(UInt160),
}

/// The methods of which contracts a contract is permitted to call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractPermission {
    /// The contracts the permission applies to.
    pub contract: ContractPermissionDescriptor,

    /// The permitted method names; `None` is the wildcard.
    pub methods: Option<Vec<String>>,
}

impl ContractPermission {
    /// The permission allowing calls to any method of any contract, the
    /// default for native contract manifests.
    pub fn default_wildcard() -> Self {
        Self {
            contract: ContractPermissionDescriptor::Wildcard,
            methods: None,
        }
    }

    /// Checks whether the permission covers the given contract.
    pub fn allows_contract(&self, hash: &UInt160) -> bool {
        match &self.contract {
            ContractPermissionDescriptor::Wildcard => true,
            ContractPermissionDescriptor::Hash(allowed) => allowed == hash,
        }
    }

    /// Checks whether the permission covers the given method.
    pub fn allows_method(&self, method: &str) -> bool {
        match &self.methods {
            None => true,
            Some(methods) => methods.iter().any(|m| m == method),
        }
    }
}
