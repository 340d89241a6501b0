//! Pumping power of the vertical injection and production legs.

use crate::error::{HydraulicsError, HydraulicsResult};
use crate::friction::{Casing, FrictionConfig, darcy_friction_factor};
use ags_core::numeric::ensure_finite;
use ags_core::units::constants::G0_MPS2;
use ags_core::units::{Length, MassRate, Temperature, k};
use ags_fluids::FluidProperties;
use std::f64::consts::PI;

/// Geometry and operating point of the vertical legs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalLegs {
    pub depth: Length,
    pub diameter: Length,
    pub total_mass_flow: MassRate,
    pub injection_temperature: Temperature,
}

/// Pumping power of each vertical leg [W] per time sample.
///
/// Both are expressed as the pump work needed to drive the pressure change
/// along the flow direction, so the total loop requirement is
/// `downgoing + nonvertical - upgoing`.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalLegPowers {
    /// Friction minus hydrostatic gain in the injection leg.
    pub downgoing: Vec<f64>,
    /// Pressure change along the production leg (negative: friction and
    /// lift both lower the pressure).
    pub upgoing: Vec<f64>,
}

/// Hydraulics of the vertical wells.
pub trait VerticalWellHydraulics {
    fn leg_powers(
        &self,
        fluid: &dyn FluidProperties,
        legs: &VerticalLegs,
        produced_temperature: &[f64],
    ) -> HydraulicsResult<VerticalLegPowers>;
}

/// Cased vertical wells with Darcy-Weisbach friction and hydrostatic head.
///
/// Powers are converted with the injection density, so the lighter hot
/// column in the production leg shows up as a thermosiphon credit.
#[derive(Debug, Clone, PartialEq)]
pub struct DarcyVerticalWells {
    pub friction: FrictionConfig,
    pub pump_efficiency: f64,
}

impl Default for DarcyVerticalWells {
    fn default() -> Self {
        Self {
            friction: FrictionConfig::default(),
            pump_efficiency: 0.75,
        }
    }
}

impl DarcyVerticalWells {
    fn friction_drop(&self, mdot: f64, rho: f64, mu: f64, depth: f64, diameter: f64) -> HydraulicsResult<f64> {
        let area = PI * diameter * diameter / 4.0;
        let velocity = mdot / (rho * area);
        let reynolds = ensure_finite(4.0 * mdot / (mu * PI * diameter), "Reynolds number")?;
        let f = darcy_friction_factor(
            reynolds,
            Casing::Cased.relative_roughness(diameter),
            &self.friction,
        );
        Ok(ensure_finite(
            f.value * depth / diameter * 0.5 * rho * velocity * velocity,
            "vertical friction drop",
        )?)
    }
}

impl VerticalWellHydraulics for DarcyVerticalWells {
    fn leg_powers(
        &self,
        fluid: &dyn FluidProperties,
        legs: &VerticalLegs,
        produced_temperature: &[f64],
    ) -> HydraulicsResult<VerticalLegPowers> {
        let depth = legs.depth.value;
        let diameter = legs.diameter.value;
        let mdot = legs.total_mass_flow.value;
        if !(depth > 0.0 && diameter > 0.0 && mdot > 0.0) {
            return Err(HydraulicsError::InvalidArg {
                what: "vertical depth, diameter and flow must be positive",
            });
        }
        if !(self.pump_efficiency > 0.0 && self.pump_efficiency <= 1.0) {
            return Err(HydraulicsError::InvalidArg {
                what: "pump efficiency must be in (0, 1]",
            });
        }

        let rho_cold = fluid.rho(legs.injection_temperature)?.value;
        let mu_cold = fluid.mu(legs.injection_temperature)?.value;
        let to_power = |dp: f64| mdot * dp / (rho_cold * self.pump_efficiency);

        let down_friction = self.friction_drop(mdot, rho_cold, mu_cold, depth, diameter)?;
        let down = to_power(down_friction - rho_cold * G0_MPS2 * depth);
        let downgoing = vec![down; produced_temperature.len()];

        let upgoing = produced_temperature
            .iter()
            .map(|&t| {
                let rho_hot = fluid.rho(k(t))?.value;
                let mu_hot = fluid.mu(k(t))?.value;
                let friction = self.friction_drop(mdot, rho_hot, mu_hot, depth, diameter)?;
                Ok(to_power(-(friction + rho_hot * G0_MPS2 * depth)))
            })
            .collect::<HydraulicsResult<Vec<f64>>>()?;

        Ok(VerticalLegPowers {
            downgoing,
            upgoing,
        })
    }
}
