//! ags-hydraulics: pressure drop, pumping power and wellbore heat loss.
//!
//! Provides:
//! - Colebrook-White friction factor with a configurable iteration policy
//! - `PressureDropEngine` for the nonvertical (lateral) section
//! - `VerticalWellHydraulics` for the injection and production legs
//! - `WellboreHeatLoss` models (Ramey, constant drop) for the production leg

pub mod error;
pub mod friction;
pub mod heat_loss;
pub mod pressure_drop;
pub mod vertical;

pub use error::{HydraulicsError, HydraulicsResult};
pub use friction::{
    Casing, FrictionConfig, FrictionFactor, LAMINAR_LIMIT, colebrook_update, darcy_friction_factor,
    swamee_jain, turbulent_friction_factor,
};
pub use heat_loss::{ConstantTemperatureDrop, RameyHeatLoss, WellboreHeatLoss};
pub use pressure_drop::{LateralSection, PressureDropEngine, PressureDropSeries, darcy_weisbach_drop};
pub use vertical::{DarcyVerticalWells, VerticalLegPowers, VerticalLegs, VerticalWellHydraulics};

/// Total loop pumping power `downgoing + nonvertical - upgoing`, clamped at
/// zero where the thermosiphon carries the loop.
pub fn total_pumping_power(
    nonvertical: &[f64],
    legs: &VerticalLegPowers,
) -> HydraulicsResult<Vec<f64>> {
    if nonvertical.len() != legs.downgoing.len() || nonvertical.len() != legs.upgoing.len() {
        return Err(HydraulicsError::InvalidArg {
            what: "pumping power series lengths differ",
        });
    }
    let mut total: Vec<f64> = nonvertical
        .iter()
        .zip(&legs.downgoing)
        .zip(&legs.upgoing)
        .map(|((nv, down), up)| down + nv - up)
        .collect();
    ags_core::numeric::clamp_non_negative(&mut total);
    Ok(total)
}
