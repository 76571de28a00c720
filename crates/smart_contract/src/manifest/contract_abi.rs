//! Contract ABI (Application Binary Interface) implementation.
//!
//! Defines the interface of a smart contract including methods, events
//! and parameters.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Represents the ABI of a smart contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAbi {
    /// The methods exposed by the contract.
    pub methods: Vec<ContractMethod>,

    /// The events that can be emitted by the contract.
    pub events: Vec<ContractEvent>,
}

/// Represents a method in a contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMethod {
    /// The name of the method.
    pub name: String,

    /// The parameters of the method.
    pub parameters: Vec<ContractParameter>,

    /// The return type of the method.
    #[serde(rename = "returntype")]
    pub return_type: ContractParameterType,

    /// The offset of the method in the contract script.
    pub offset: usize,

    /// Whether the method is safe (read-only).
    pub safe: bool,
}

/// Represents an event in a contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvent {
    /// The name of the event.
    pub name: String,

    /// The parameters of the event.
    pub parameters: Vec<ContractParameter>,
}

/// Represents a parameter in a contract method or event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractParameter {
    /// The name of the parameter.
    pub name: String,

    /// The type of the parameter.
    #[serde(rename = "type")]
    pub parameter_type: ContractParameterType,
}

/// Contract parameter types as defined in Neo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractParameterType {
    /// Any type.
    Any,
    /// Boolean type.
    Boolean,
    /// Integer type.
    Integer,
    /// Byte array type.
    ByteArray,
    /// String type.
    String,
    /// Hash160 type (20 bytes).
    Hash160,
    /// Hash256 type (32 bytes).
    Hash256,
    /// Public key type.
    PublicKey,
    /// Signature type.
    Signature,
    /// Array type.
    Array,
    /// Map type.
    Map,
    /// InteropInterface type.
    InteropInterface,
    /// Void type (no return value).
    Void,
}

impl ContractAbi {
    /// Creates a new empty contract ABI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a method by name.
    pub fn get_method(&self, name: &str) -> Option<&ContractMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Gets an event by name.
    pub fn get_event(&self, name: &str) -> Option<&ContractEvent> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Validates the ABI, rejecting empty or duplicate member names.
    pub fn validate(&self) -> Result<()> {
        let mut method_keys = std::collections::HashSet::new();
        for method in &self.methods {
            if method.name.is_empty() {
                return Err(Error::InvalidManifest(
                    "Method name cannot be empty".to_string(),
                ));
            }
            // Overloads are distinguished by arity.
            if !method_keys.insert((method.name.clone(), method.parameters.len())) {
                return Err(Error::InvalidManifest(format!(
                    "Duplicate method: {}/{}",
                    method.name,
                    method.parameters.len()
                )));
            }
        }

        let mut event_names = std::collections::HashSet::new();
        for event in &self.events {
            if event.name.is_empty() {
                return Err(Error::InvalidManifest(
                    "Event name cannot be empty".to_string(),
                ));
            }
            if !event_names.insert(&event.name) {
                return Err(Error::InvalidManifest(format!(
                    "Duplicate event name: {}",
                    event.name
                )));
            }
        }

        Ok(())
    }
}

impl ContractMethod {
    /// Creates a new contract method descriptor with no offset assigned.
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ContractParameter>,
        return_type: ContractParameterType,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
            offset: 0,
            safe: false,
        }
    }
}

impl ContractEvent {
    /// Creates a new contract event descriptor.
    pub fn new(name: impl Into<String>, parameters: Vec<ContractParameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

impl ContractParameter {
    /// Creates a new contract parameter.
    pub fn new(name: impl Into<String>, parameter_type: ContractParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_method() {
        let mut abi = ContractAbi::new();
        abi.methods.push(ContractMethod::new(
            "balanceOf",
            vec![ContractParameter::new(
                "account",
                ContractParameterType::Hash160,
            )],
            ContractParameterType::Integer,
        ));

        assert!(abi.get_method("balanceOf").is_some());
        assert!(abi.get_method("transfer").is_none());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut abi = ContractAbi::new();
        abi.methods
            .push(ContractMethod::new("f", vec![], ContractParameterType::Void));
        abi.methods
            .push(ContractMethod::new("f", vec![], ContractParameterType::Void));
        assert!(abi.validate().is_err());
    }

    #[test]
    fn test_validate_allows_overloads() {
        let mut abi = ContractAbi::new();
        abi.methods
            .push(ContractMethod::new("f", vec![], ContractParameterType::Void));
        abi.methods.push(ContractMethod::new(
            "f",
            vec![ContractParameter::new("x", ContractParameterType::Any)],
            ContractParameterType::Void,
        ));
        assert!(abi.validate().is_ok());
    }

    #[test]
    fn test_json_field_names() {
        let method = ContractMethod::new("f", vec![], ContractParameterType::Void);
        let json = serde_json::to_value(&method).unwrap();
        assert!(json.get("returntype").is_some());

        let param = ContractParameter::new("x", ContractParameterType::Hash160);
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "Hash160");
    }
}
