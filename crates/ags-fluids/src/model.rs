//! Fluid property model trait and validation helpers.

use crate::error::FluidResult;
use crate::fluid::WorkingFluid;
use ags_core::units::{Density, DynVisc, SpecHeatCapacity, Temperature};

/// Temperature-dependent properties needed by the wellbore hydraulics and
/// conduction models.
///
/// Closed-loop laterals see only modest pressure variation compared with the
/// temperature swing along the loop, so properties are functions of
/// temperature alone. Backends that need a pressure fix it at construction.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait FluidProperties: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Working fluid this model describes.
    fn fluid(&self) -> WorkingFluid;

    /// Density [kg/m³] at temperature `t`.
    fn rho(&self, t: Temperature) -> FluidResult<Density>;

    /// Dynamic viscosity [Pa·s] at temperature `t`.
    fn mu(&self, t: Temperature) -> FluidResult<DynVisc>;

    /// Specific heat capacity at constant pressure [J/(kg·K)] at temperature `t`.
    fn cp(&self, t: Temperature) -> FluidResult<SpecHeatCapacity>;
}

/// Validation helpers for fluid properties.
pub mod validation {
    use crate::error::{FluidError, FluidResult};
    use ags_core::units::{Density, DynVisc, Temperature};

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: Density) -> FluidResult<()> {
        if !rho.value.is_finite() || rho.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure viscosity is positive and finite.
    pub fn validate_viscosity(mu: DynVisc) -> FluidResult<()> {
        if !mu.value.is_finite() || mu.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "viscosity must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure heat capacity is positive and finite.
    pub fn validate_cp(cp: f64) -> FluidResult<()> {
        if !cp.is_finite() || cp <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "cp must be positive and finite",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use ags_core::units::{k, kg_per_m3, pa_s};

    #[test]
    fn validate_positive_temperature() {
        assert!(validate_temperature(k(300.0)).is_ok());
        assert!(validate_temperature(k(-10.0)).is_err());
        assert!(validate_temperature(k(0.0)).is_err());
        assert!(validate_temperature(k(f64::NAN)).is_err());
    }

    #[test]
    fn validate_density_positive() {
        assert!(validate_density(kg_per_m3(1000.0)).is_ok());
        assert!(validate_density(kg_per_m3(-1.0)).is_err());
        assert!(validate_density(kg_per_m3(0.0)).is_err());
    }

    #[test]
    fn validate_viscosity_positive() {
        assert!(validate_viscosity(pa_s(1e-3)).is_ok());
        assert!(validate_viscosity(pa_s(0.0)).is_err());
    }

    #[test]
    fn validate_cp_positive() {
        assert!(validate_cp(1000.0).is_ok());
        assert!(validate_cp(-100.0).is_err());
        assert!(validate_cp(0.0).is_err());
    }
}
