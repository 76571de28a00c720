// Copyright (C) 2015-2025 The Neo Project.
//
// protocol_settings.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::constants::MILLISECONDS_PER_BLOCK;
use crate::hardfork::Hardfork;
use std::collections::HashMap;

/// Represents the protocol settings of the NEO system.
/// Matches the C# ProtocolSettings record, trimmed to the properties the
/// script runtime consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolSettings {
    /// The magic number of the NEO network.
    /// Matches C# Network property
    pub network: u32,

    /// The address version of the NEO system.
    /// Matches C# AddressVersion property
    pub address_version: u8,

    /// Indicates the time in milliseconds between two blocks.
    /// Matches C# MillisecondsPerBlock property
    pub milliseconds_per_block: u32,

    /// Sets the block height from which a hardfork is activated.
    /// Matches C# Hardforks property
    pub hardforks: HashMap<Hardfork, u32>,
}

impl ProtocolSettings {
    /// Creates settings with MainNet hardfork heights (matches C#
    /// config.mainnet.json exactly).
    pub fn mainnet() -> Self {
        let mut hardforks = HashMap::new();
        hardforks.insert(Hardfork::Aspidochelone, 1_730_000);
        hardforks.insert(Hardfork::Basilisk, 4_120_000);
        hardforks.insert(Hardfork::Cockatrice, 5_450_000);
        hardforks.insert(Hardfork::Domovoi, 5_570_000);
        hardforks.insert(Hardfork::Echidna, 7_300_000);
        Self {
            network: 0x334F454E,
            address_version: 0x35,
            milliseconds_per_block: MILLISECONDS_PER_BLOCK,
            hardforks,
        }
    }

    /// Creates settings with TestNet hardfork heights (matches C#
    /// config.testnet.json exactly).
    pub fn testnet() -> Self {
        let mut hardforks = HashMap::new();
        hardforks.insert(Hardfork::Aspidochelone, 210_000);
        hardforks.insert(Hardfork::Basilisk, 2_680_000);
        hardforks.insert(Hardfork::Cockatrice, 3_967_000);
        hardforks.insert(Hardfork::Domovoi, 4_144_000);
        hardforks.insert(Hardfork::Echidna, 5_870_000);
        Self {
            network: 0x3454334E,
            address_version: 0x35,
            milliseconds_per_block: MILLISECONDS_PER_BLOCK,
            hardforks,
        }
    }

    /// Checks whether a hardfork is active at the specified block height
    /// (matches C# ProtocolSettings.IsHardforkEnabled). Hardforks missing
    /// from the configuration are never enabled.
    pub fn is_hardfork_enabled(&self, hardfork: Hardfork, block_height: u32) -> bool {
        match self.hardforks.get(&hardfork) {
            Some(&height) => block_height >= height,
            None => false,
        }
    }
}

impl Default for ProtocolSettings {
    fn default() -> Self {
        Self {
            network: 0,
            address_version: 0x35,
            milliseconds_per_block: MILLISECONDS_PER_BLOCK,
            hardforks: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_hardforks() {
        let settings = ProtocolSettings::mainnet();
        assert!(settings.is_hardfork_enabled(Hardfork::Aspidochelone, 1_730_000));
        assert!(!settings.is_hardfork_enabled(Hardfork::Aspidochelone, 1_729_999));
        assert!(settings.is_hardfork_enabled(Hardfork::Echidna, 7_300_000));
        assert!(!settings.is_hardfork_enabled(Hardfork::Echidna, 7_299_999));
    }

    #[test]
    fn test_unconfigured_hardfork_is_disabled() {
        let settings = ProtocolSettings::default();
        assert!(!settings.is_hardfork_enabled(Hardfork::Basilisk, u32::MAX));
    }
}
