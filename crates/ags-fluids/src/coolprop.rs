//! CoolProp-based fluid property model.

use crate::error::{FluidError, FluidResult};
use crate::fluid::WorkingFluid;
use crate::model::{FluidProperties, validation};
use ags_core::units::{Density, DynVisc, Pressure, SpecHeatCapacity, Temperature, kg_per_m3, pa_s};
use rfluids::prelude::*;

/// CoolProp backend evaluated along a fixed-pressure isobar.
///
/// Thread-safe: rfluids Fluid instances are created per query.
pub struct CoolPropProperties {
    fluid: WorkingFluid,
    pressure: Pressure,
}

impl CoolPropProperties {
    /// Create a new CoolProp model for `fluid` at `pressure`.
    pub fn new(fluid: WorkingFluid, pressure: Pressure) -> Self {
        Self { fluid, pressure }
    }

    /// Create a Fluid instance at the model pressure and temperature `t_k`.
    fn fluid_at_t(&self, t_k: f64) -> FluidResult<Fluid> {
        let p_pa = self.pressure.value;
        Fluid::from(self.fluid.rfluids_pure())
            .in_state(FluidInput::pressure(p_pa), FluidInput::temperature(t_k))
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at P={} Pa, T={} K: {}", p_pa, t_k, e),
            })
    }
}

impl FluidProperties for CoolPropProperties {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn fluid(&self) -> WorkingFluid {
        self.fluid
    }

    fn rho(&self, t: Temperature) -> FluidResult<Density> {
        validation::validate_temperature(t)?;
        let mut fluid = self.fluid_at_t(t.value)?;
        let rho_val = fluid.density().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting density: {}", e),
        })?;
        let rho = kg_per_m3(rho_val);
        validation::validate_density(rho)?;
        Ok(rho)
    }

    fn mu(&self, t: Temperature) -> FluidResult<DynVisc> {
        validation::validate_temperature(t)?;
        let mut fluid = self.fluid_at_t(t.value)?;
        let mu_val = fluid.dynamic_viscosity().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting viscosity: {}", e),
        })?;
        let mu = pa_s(mu_val);
        validation::validate_viscosity(mu)?;
        Ok(mu)
    }

    fn cp(&self, t: Temperature) -> FluidResult<SpecHeatCapacity> {
        validation::validate_temperature(t)?;
        let mut fluid = self.fluid_at_t(t.value)?;
        let cp = fluid.specific_heat().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting specific heat: {}", e),
        })?;
        validation::validate_cp(cp)?;
        Ok(cp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ags_core::units::{degc, pa};

    #[test]
    fn water_density_near_reference() {
        let model = CoolPropProperties::new(WorkingFluid::Water, pa(1.0e7));
        let rho = model.rho(degc(25.0)).unwrap();
        assert!(rho.value > 990.0 && rho.value < 1010.0, "rho = {}", rho.value);
    }
}
