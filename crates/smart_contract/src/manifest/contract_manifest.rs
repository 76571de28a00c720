//! Contract manifest implementation.
//!
//! Represents the manifest of a smart contract which declares the
//! features and permissions it will use when deployed. For native
//! contracts the manifest is synthesized per hardfork from the filtered
//! ABI tables.

use crate::manifest::{ContractAbi, ContractPermission};
use crate::{Error, Result};
use neo_core::UInt160;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Maximum length of a contract manifest in bytes.
pub const MAX_MANIFEST_LENGTH: usize = u16::MAX as usize;

/// Represents the manifest of a smart contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractManifest {
    /// The name of the contract.
    pub name: String,

    /// The groups that the contract belongs to.
    pub groups: Vec<Value>,

    /// The features supported by the contract.
    pub features: HashMap<String, String>,

    /// The standards supported by the contract.
    #[serde(rename = "supportedstandards")]
    pub supported_standards: Vec<String>,

    /// The ABI (Application Binary Interface) of the contract.
    pub abi: ContractAbi,

    /// The permissions required by the contract.
    pub permissions: Vec<ContractPermission>,

    /// The contracts that this contract trusts.
    pub trusts: Vec<UInt160>,

    /// Additional metadata.
    pub extra: Option<Value>,
}

impl ContractManifest {
    /// Creates the default manifest for the given contract name: empty
    /// ABI, no groups or trusts and a single wildcard permission
    /// (matches the Go `manifest.DefaultManifest`).
    pub fn default_manifest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            features: HashMap::new(),
            supported_standards: Vec::new(),
            abi: ContractAbi::default(),
            permissions: vec![ContractPermission::default_wildcard()],
            trusts: Vec::new(),
            extra: None,
        }
    }

    /// Converts the manifest to its JSON representation.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parses a contract manifest from JSON (matches C#
    /// ContractManifest.Parse).
    pub fn parse(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validates the manifest.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidManifest(
                "Contract name cannot be empty".to_string(),
            ));
        }

        if self.permissions.is_empty() {
            return Err(Error::InvalidManifest(
                "At least one permission required".to_string(),
            ));
        }

        self.abi.validate()
    }

    /// Checks if the contract can call the given method of another
    /// contract.
    pub fn can_call(&self, target_hash: &UInt160, target_method: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p.allows_contract(target_hash) && p.allows_method(target_method))
    }

    /// Checks if the contract supports a specific standard.
    pub fn supports_standard(&self, standard: &str) -> bool {
        self.supported_standards.iter().any(|s| s == standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{ContractMethod, ContractParameterType};

    #[test]
    fn test_default_manifest() {
        let manifest = ContractManifest::default_manifest("PolicyContract");
        assert_eq!(manifest.name, "PolicyContract");
        assert!(manifest.abi.methods.is_empty());
        assert_eq!(manifest.permissions.len(), 1);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_name() {
        let mut manifest = ContractManifest::default_manifest("T");
        manifest.name.clear();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut manifest = ContractManifest::default_manifest("Token");
        manifest.supported_standards.push("NEP-17".to_string());
        manifest.abi.methods.push(ContractMethod::new(
            "symbol",
            vec![],
            ContractParameterType::String,
        ));

        let json = manifest.to_json().unwrap().to_string();
        let parsed = ContractManifest::parse(&json).unwrap();
        assert_eq!(parsed, manifest);
        assert!(json.contains("supportedstandards"));
    }

    #[test]
    fn test_wildcard_can_call() {
        let manifest = ContractManifest::default_manifest("T");
        assert!(manifest.can_call(&UInt160::zero(), "anything"));
    }

    #[test]
    fn test_supports_standard() {
        let mut manifest = ContractManifest::default_manifest("T");
        manifest.supported_standards.push("NEP-17".to_string());
        assert!(manifest.supports_standard("NEP-17"));
        assert!(!manifest.supports_standard("NEP-11"));
    }
}
