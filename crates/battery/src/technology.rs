//! Battery technologies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Possible battery technologies. Non-exhaustive in spirit: chemistries the
/// kernel reports but this list does not know map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Technology {
    Unknown,
    LithiumIon,
    LeadAcid,
    LithiumPolymer,
    NickelMetalHydride,
    NickelCadmium,
    NickelZinc,
    LithiumIronPhosphate,
    RechargeableAlkalineManganese,
}

impl Technology {
    /// Parse a kernel technology string (the sysfs `technology` file), also
    /// accepting the dashed names this type displays as.
    pub fn from_sysfs(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "li-ion" | "lion" | "lithium-ion" => Self::LithiumIon,
            "pb" | "lead-acid" => Self::LeadAcid,
            "li-poly" | "lipo" | "lithium-polymer" => Self::LithiumPolymer,
            "nimh" | "nickel-metal-hydride" => Self::NickelMetalHydride,
            "nicd" | "nickel-cadmium" => Self::NickelCadmium,
            "nizn" | "nickel-zinc" => Self::NickelZinc,
            "life" | "lifepo4" | "lithium-iron-phosphate" => Self::LithiumIronPhosphate,
            "ram" | "rechargeable-alkaline-manganese" => Self::RechargeableAlkalineManganese,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::LithiumIon => "lithium-ion",
            Self::LeadAcid => "lead-acid",
            Self::LithiumPolymer => "lithium-polymer",
            Self::NickelMetalHydride => "nickel-metal-hydride",
            Self::NickelCadmium => "nickel-cadmium",
            Self::NickelZinc => "nickel-zinc",
            Self::LithiumIronPhosphate => "lithium-iron-phosphate",
            Self::RechargeableAlkalineManganese => "rechargeable-alkaline-manganese",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
