//! Hardfork configuration and detection for the Neo blockchain.

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a hardfork in the Neo blockchain (matches C# Hardfork enum
/// exactly). The derived ordering follows activation order: older
/// hardforks compare smaller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Hardfork {
    /// Aspidochelone hardfork
    Aspidochelone = 0,
    /// Basilisk hardfork
    Basilisk = 1,
    /// Cockatrice hardfork
    Cockatrice = 2,
    /// Domovoi hardfork
    Domovoi = 3,
    /// Echidna hardfork
    Echidna = 4,
}

impl Hardfork {
    /// All known hardforks, in activation order.
    pub const ALL: [Hardfork; 5] = [
        Hardfork::Aspidochelone,
        Hardfork::Basilisk,
        Hardfork::Cockatrice,
        Hardfork::Domovoi,
        Hardfork::Echidna,
    ];

    /// The configuration name of the hardfork.
    pub fn as_str(&self) -> &'static str {
        match self {
            Hardfork::Aspidochelone => "Aspidochelone",
            Hardfork::Basilisk => "Basilisk",
            Hardfork::Cockatrice => "Cockatrice",
            Hardfork::Domovoi => "Domovoi",
            Hardfork::Echidna => "Echidna",
        }
    }
}

impl fmt::Display for Hardfork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hardfork {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hardfork::ALL
            .into_iter()
            .find(|hf| hf.as_str() == s)
            .ok_or_else(|| CoreError::invalid_format(format!("Unknown hardfork: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_activation_order() {
        assert!(Hardfork::Aspidochelone < Hardfork::Basilisk);
        assert!(Hardfork::Basilisk < Hardfork::Cockatrice);
        assert!(Hardfork::Domovoi < Hardfork::Echidna);
    }

    #[test]
    fn test_name_round_trip() {
        for hf in Hardfork::ALL {
            assert_eq!(hf.as_str().parse::<Hardfork>().unwrap(), hf);
        }
        assert!("Wyvern".parse::<Hardfork>().is_err());
    }
}
