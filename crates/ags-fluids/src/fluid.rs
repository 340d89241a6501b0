//! Working fluid definitions.

use serde::{Deserialize, Serialize};

/// Working fluids circulated through a closed-loop well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkingFluid {
    /// Water (H₂O)
    #[serde(rename = "H2O", alias = "water", alias = "Water")]
    Water,
    /// Supercritical carbon dioxide (sCO₂)
    #[serde(rename = "sCO2", alias = "CO2", alias = "co2")]
    CarbonDioxide,
}

impl WorkingFluid {
    pub const ALL: [WorkingFluid; 2] = [WorkingFluid::Water, WorkingFluid::CarbonDioxide];

    /// Key used by the performance database container (`H2O` / `sCO2`).
    pub fn key(&self) -> &'static str {
        match self {
            WorkingFluid::Water => "H2O",
            WorkingFluid::CarbonDioxide => "sCO2",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkingFluid::Water => "Water",
            WorkingFluid::CarbonDioxide => "Supercritical CO2",
        }
    }

    /// Map to rfluids Pure enum (internal use for CoolProp backend).
    #[cfg(feature = "coolprop")]
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            WorkingFluid::Water => Pure::Water,
            WorkingFluid::CarbonDioxide => Pure::CarbonDioxide,
        }
    }
}

impl std::fmt::Display for WorkingFluid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for WorkingFluid {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "H2O" | "WATER" => Ok(WorkingFluid::Water),
            "SCO2" | "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(WorkingFluid::CarbonDioxide),
            _ => Err("unknown working fluid"),
        }
    }
}
