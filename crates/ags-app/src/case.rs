//! Case file schema and the engine inputs derived from it.

use crate::timeline::SimulationTimeline;
use ags_conduction::{ConductionConfig, DomainBoundaries, RockProperties};
use ags_core::units::{
    Length, MassRate, Temperature, ThermalConductivity, degc, kg_per_m3, kgps, m, w_per_m_k,
};
use ags_database::Configuration;
use ags_fluids::WorkingFluid;
use ags_hydraulics::{Casing, FrictionConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Latest case file version understood by this crate.
pub const LATEST_VERSION: u32 = 1;

/// One closed-loop well design and operating scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    pub fluid: WorkingFluid,
    pub configuration: Configuration,
    pub well: WellDef,
    pub operation: OperationDef,
    pub rock: RockDef,
    #[serde(default)]
    pub timeline: SimulationTimeline,
    /// Database container file or directory, relative to the case file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(default)]
    pub numerics: NumericsDef,
}

fn default_version() -> u32 {
    LATEST_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellDef {
    pub vertical_depth_m: f64,
    /// Nonvertical length of each lateral.
    pub lateral_length_m: f64,
    #[serde(default = "default_lateral_count")]
    pub lateral_count: usize,
    pub lateral_diameter_m: f64,
    /// Defaults to the lateral diameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_diameter_m: Option<f64>,
    #[serde(default)]
    pub casing: Casing,
    #[serde(default = "default_lateral_spacing")]
    pub lateral_spacing_m: f64,
}

fn default_lateral_count() -> usize {
    1
}

fn default_lateral_spacing() -> f64 {
    100.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationDef {
    /// Total circulating flow.
    pub mass_flow_kg_s: f64,
    pub injection_temperature_c: f64,
    #[serde(default = "default_pump_efficiency")]
    pub pump_efficiency: f64,
    /// Fraction of the year the loop circulates.
    #[serde(default = "default_utilization")]
    pub utilization: f64,
}

fn default_pump_efficiency() -> f64 {
    0.75
}

fn default_utilization() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RockDef {
    #[serde(default = "default_surface_temperature")]
    pub surface_temperature_c: f64,
    pub gradient_k_per_m: f64,
    pub conductivity_w_m_k: f64,
    #[serde(default = "default_rock_density")]
    pub density_kg_m3: f64,
    #[serde(default = "default_rock_heat_capacity")]
    pub heat_capacity_j_kg_k: f64,
    /// Vertical half-thickness of rock heated by the laterals.
    #[serde(default = "default_slab_half_height")]
    pub slab_half_height_m: f64,
}

fn default_surface_temperature() -> f64 {
    15.0
}

fn default_rock_density() -> f64 {
    2750.0
}

fn default_rock_heat_capacity() -> f64 {
    790.0
}

fn default_slab_half_height() -> f64 {
    250.0
}

/// Numerical settings and collaborator choices.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NumericsDef {
    #[serde(default)]
    pub conduction: ConductionConfig,
    #[serde(default)]
    pub friction: FrictionConfig,
    #[serde(default)]
    pub heat_loss: HeatLossDef,
    #[serde(default)]
    pub fluid_model: FluidModelDef,
}

/// Wellbore heat loss between the lateral outlet and surface.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum HeatLossDef {
    #[default]
    Ramey,
    Constant {
        drop_k: f64,
    },
    None,
}

/// Source of working-fluid properties.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum FluidModelDef {
    #[default]
    Tabulated,
    CoolProp {
        pressure_mpa: f64,
    },
}

/// Wellbore geometry in engine units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellGeometry {
    pub vertical_depth: Length,
    pub lateral_length: Length,
    pub lateral_count: usize,
    pub lateral_diameter: Length,
    pub vertical_diameter: Length,
    pub casing: Casing,
    pub configuration: Configuration,
    pub lateral_spacing: Length,
}

impl Case {
    pub fn geometry(&self) -> WellGeometry {
        let well = &self.well;
        WellGeometry {
            vertical_depth: m(well.vertical_depth_m),
            lateral_length: m(well.lateral_length_m),
            lateral_count: well.lateral_count,
            lateral_diameter: m(well.lateral_diameter_m),
            vertical_diameter: m(well.vertical_diameter_m.unwrap_or(well.lateral_diameter_m)),
            casing: well.casing,
            configuration: self.configuration,
            lateral_spacing: m(well.lateral_spacing_m),
        }
    }

    pub fn mass_flow(&self) -> MassRate {
        kgps(self.operation.mass_flow_kg_s)
    }

    pub fn injection_temperature(&self) -> Temperature {
        degc(self.operation.injection_temperature_c)
    }

    pub fn rock_conductivity(&self) -> ThermalConductivity {
        w_per_m_k(self.rock.conductivity_w_m_k)
    }

    /// Undisturbed rock temperature at the lateral depth.
    pub fn initial_temperature(&self) -> Temperature {
        degc(self.rock.surface_temperature_c + self.rock.gradient_k_per_m * self.well.vertical_depth_m)
    }

    pub fn rock_properties(&self) -> RockProperties {
        RockProperties {
            density: kg_per_m3(self.rock.density_kg_m3),
            heat_capacity: self.rock.heat_capacity_j_kg_k,
            conductivity: self.rock_conductivity(),
        }
    }

    /// Image planes midway to the neighbouring lateral and at the slab edge.
    pub fn domain_boundaries(&self) -> DomainBoundaries {
        DomainBoundaries {
            half_spacing: m(0.5 * self.well.lateral_spacing_m),
            half_height: m(self.rock.slab_half_height_m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ags_core::units::to_degc;
    use approx::assert_relative_eq;

    const MINIMAL: &str = r#"
name: minimal
fluid: H2O
configuration: coaxial
well:
  vertical_depth_m: 3000
  lateral_length_m: 5000
  lateral_diameter_m: 0.35
operation:
  mass_flow_kg_s: 20
  injection_temperature_c: 40
rock:
  gradient_k_per_m: 0.05
  conductivity_w_m_k: 3.0
"#;

    #[test]
    fn minimal_case_fills_defaults() {
        let case: Case = serde_yaml::from_str(MINIMAL).unwrap();
        assert_eq!(case.version, LATEST_VERSION);
        assert_eq!(case.well.lateral_count, 1);
        assert_eq!(case.well.casing, Casing::Cased);
        assert_eq!(case.timeline.plant_lifetime_years, 30);
        assert_eq!(case.numerics.heat_loss, HeatLossDef::Ramey);
        assert_eq!(case.numerics.friction.iterations, 6);
        assert_eq!(case.numerics.conduction.stehfest_samples, 16);
        assert!(case.database.is_none());
    }

    #[test]
    fn derived_quantities() {
        let case: Case = serde_yaml::from_str(MINIMAL).unwrap();
        assert_relative_eq!(to_degc(case.initial_temperature()), 165.0, epsilon = 1e-9);
        let geometry = case.geometry();
        assert_eq!(geometry.vertical_diameter, geometry.lateral_diameter);
        assert_relative_eq!(case.domain_boundaries().half_spacing.value, 50.0);
    }

    #[test]
    fn tagged_numerics_parse() {
        let yaml = format!(
            "{MINIMAL}numerics:\n  heat_loss:\n    model: constant\n    drop_k: 4.0\n  friction:\n    tolerance: 1.0e-9\n"
        );
        let case: Case = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(case.numerics.heat_loss, HeatLossDef::Constant { drop_k: 4.0 });
        assert_eq!(case.numerics.friction.iterations, 6);
        assert_eq!(case.numerics.friction.tolerance, Some(1e-9));
    }
}
