//! Contract manifest and ABI types.

pub mod contract_abi;
pub mod contract_manifest;
pub mod contract_permission;

pub use contract_abi::{
    ContractAbi, ContractEvent, ContractMethod, ContractParameter, ContractParameterType,
};
pub use contract_manifest::ContractManifest;
pub use contract_permission::{ContractPermission, ContractPermissionDescriptor};
